//! Auto-growing binary buffer writer.

const DEFAULT_CAPACITY: usize = 1024;

/// Writes binary data into an internal buffer that grows on demand.
///
/// All multi-byte integers and floats are written big-endian, which is what
/// MessagePack requires. The cursor `x` marks the end of the written data;
/// [`Writer::flush`] returns everything written since the last flush.
///
/// # Example
///
/// ```
/// use webclient_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8u16(0xcd, 0x0102);
/// assert_eq!(writer.flush(), vec![0xcd, 0x01, 0x02]);
/// ```
pub struct Writer {
    /// Backing storage. Bytes past `x` are scratch space.
    pub uint8: Vec<u8>,
    /// Current write position.
    pub x: usize,
    /// Position of the last flush.
    pub x0: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: vec![0; capacity.max(16)],
            x: 0,
            x0: 0,
        }
    }

    /// Makes sure at least `capacity` bytes can be written after the cursor.
    #[inline]
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let required = self.x + capacity;
        if required > self.uint8.len() {
            let mut size = self.uint8.len().max(16);
            while size < required {
                size *= 2;
            }
            self.uint8.resize(size, 0);
        }
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.x = 0;
        self.x0 = 0;
    }

    /// Returns the bytes written since the previous flush.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        out
    }

    /// Number of bytes written since the previous flush.
    pub fn len(&self) -> usize {
        self.x - self.x0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = byte;
        self.x += 1;
    }

    #[inline]
    pub fn i8(&mut self, value: i8) {
        self.u8(value as u8);
    }

    #[inline]
    pub fn u16(&mut self, value: u16) {
        self.raw(&value.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, value: i16) {
        self.raw(&value.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, value: u32) {
        self.raw(&value.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, value: i32) {
        self.raw(&value.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, value: u64) {
        self.raw(&value.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, value: i64) {
        self.raw(&value.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, value: f32) {
        self.raw(&value.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, value: f64) {
        self.raw(&value.to_be_bytes());
    }

    /// Writes a marker byte followed by a `u8`.
    #[inline]
    pub fn u8u8(&mut self, marker: u8, value: u8) {
        self.ensure_capacity(2);
        self.uint8[self.x] = marker;
        self.uint8[self.x + 1] = value;
        self.x += 2;
    }

    /// Writes a marker byte followed by a big-endian `u16`.
    #[inline]
    pub fn u8u16(&mut self, marker: u8, value: u16) {
        self.u8(marker);
        self.u16(value);
    }

    /// Writes a marker byte followed by a big-endian `u32`.
    #[inline]
    pub fn u8u32(&mut self, marker: u8, value: u32) {
        self.u8(marker);
        self.u32(value);
    }

    /// Writes a marker byte followed by a big-endian `u64`.
    #[inline]
    pub fn u8u64(&mut self, marker: u8, value: u64) {
        self.u8(marker);
        self.u64(value);
    }

    /// Writes a marker byte followed by a big-endian `f32`.
    #[inline]
    pub fn u8f32(&mut self, marker: u8, value: f32) {
        self.u8(marker);
        self.f32(value);
    }

    /// Writes a marker byte followed by a big-endian `f64`.
    #[inline]
    pub fn u8f64(&mut self, marker: u8, value: f64) {
        self.u8(marker);
        self.f64(value);
    }

    /// Copies a byte slice verbatim.
    pub fn buf(&mut self, bytes: &[u8]) {
        self.raw(bytes);
    }

    /// Writes a string as UTF-8 and returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.raw(s.as_bytes());
        s.len()
    }

    #[inline]
    fn raw(&mut self, bytes: &[u8]) {
        let length = bytes.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(bytes);
        self.x += length;
    }
}
