//! `MsgPackEncoder` — MessagePack writer.

use webclient_buffers::Writer;

use crate::constants::*;
use crate::PackValue;

/// MessagePack encoder writing into an auto-growing [`Writer`].
///
/// Integers always take the smallest representation that holds them, so the
/// same value tree always produces the same bytes.
pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encode a value and return the MessagePack bytes.
    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.write_null(),
            PackValue::Bool(b) => self.write_boolean(*b),
            PackValue::Integer(i) => self.write_integer(*i),
            PackValue::UInteger(u) => self.write_u_integer(*u),
            PackValue::Float32(f) => self.write_f32(*f),
            PackValue::Float(f) => self.write_f64(*f),
            PackValue::Bytes(b) => self.write_bin(b),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Array(items) => {
                self.write_arr_hdr(items.len());
                for item in items {
                    self.write_any(item);
                }
            }
            PackValue::Object(entries) => {
                self.write_obj_hdr(entries.len());
                for (key, item) in entries {
                    self.write_str(key);
                    self.write_any(item);
                }
            }
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -32 {
            self.writer.u8(int as i8 as u8);
        } else if int >= i8::MIN as i64 {
            self.writer.u8u8(INT8, int as i8 as u8);
        } else if int >= i16::MIN as i64 {
            self.writer.u8(INT16);
            self.writer.i16(int as i16);
        } else if int >= i32::MIN as i64 {
            self.writer.u8(INT32);
            self.writer.i32(int as i32);
        } else {
            self.writer.u8(INT64);
            self.writer.i64(int);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        if uint <= POSITIVE_FIXINT_MAX as u64 {
            self.writer.u8(uint as u8);
        } else if uint <= 0xff {
            self.writer.u8u8(UINT8, uint as u8);
        } else if uint <= 0xffff {
            self.writer.u8u16(UINT16, uint as u16);
        } else if uint <= 0xffff_ffff {
            self.writer.u8u32(UINT32, uint as u32);
        } else {
            self.writer.u8u64(UINT64, uint);
        }
    }

    pub fn write_f32(&mut self, float: f32) {
        self.writer.u8f32(FLOAT32, float);
    }

    pub fn write_f64(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    pub fn write_str(&mut self, s: &str) {
        let length = s.len();
        if length < 32 {
            self.writer.u8(FIXSTR | length as u8);
        } else if length <= 0xff {
            self.writer.u8u8(STR8, length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(STR16, length as u16);
        } else {
            self.writer.u8u32(STR32, length as u32);
        }
        self.writer.utf8(s);
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        let length = buf.len();
        if length <= 0xff {
            self.writer.u8u8(BIN8, length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(BIN16, length as u16);
        } else {
            self.writer.u8u32(BIN32, length as u32);
        }
        self.writer.buf(buf);
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        if length < 16 {
            self.writer.u8(FIXARRAY | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(ARRAY16, length as u16);
        } else {
            self.writer.u8u32(ARRAY32, length as u32);
        }
    }

    pub fn write_obj_hdr(&mut self, length: usize) {
        if length < 16 {
            self.writer.u8(FIXMAP | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, length as u32);
        }
    }

    /// Returns everything written since the last flush.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(f: impl FnOnce(&mut MsgPackEncoder)) -> Vec<u8> {
        let mut encoder = MsgPackEncoder::new();
        f(&mut encoder);
        encoder.flush()
    }

    #[test]
    fn integers_use_smallest_representation() {
        assert_eq!(bytes(|e| e.write_integer(0)), vec![0x00]);
        assert_eq!(bytes(|e| e.write_integer(127)), vec![0x7f]);
        assert_eq!(bytes(|e| e.write_integer(128)), vec![0xcc, 0x80]);
        assert_eq!(bytes(|e| e.write_integer(-1)), vec![0xff]);
        assert_eq!(bytes(|e| e.write_integer(-32)), vec![0xe0]);
        assert_eq!(bytes(|e| e.write_integer(-33)), vec![0xd0, 0xdf]);
        assert_eq!(bytes(|e| e.write_integer(65_536)), vec![0xce, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(bytes(|e| e.write_integer(-129)), vec![0xd1, 0xff, 0x7f]);
    }

    #[test]
    fn strings_pick_header_by_byte_length() {
        assert_eq!(bytes(|e| e.write_str("id")), vec![0xa2, b'i', b'd']);
        let long = "x".repeat(40);
        let out = bytes(|e| e.write_str(&long));
        assert_eq!(&out[..2], &[0xd9, 40]);
        assert_eq!(out.len(), 42);
    }

    #[test]
    fn headers() {
        assert_eq!(bytes(|e| e.write_obj_hdr(3)), vec![0x83]);
        assert_eq!(bytes(|e| e.write_arr_hdr(0)), vec![0x90]);
        assert_eq!(bytes(|e| e.write_arr_hdr(16)), vec![0xdc, 0x00, 0x10]);
        assert_eq!(bytes(|e| e.write_bin(&[1, 2])), vec![0xc4, 0x02, 0x01, 0x02]);
    }

    #[test]
    fn scalars() {
        assert_eq!(bytes(|e| e.write_null()), vec![0xc0]);
        assert_eq!(bytes(|e| e.write_boolean(true)), vec![0xc3]);
        assert_eq!(bytes(|e| e.write_boolean(false)), vec![0xc2]);
        let out = bytes(|e| e.write_f32(1.5));
        assert_eq!(out[0], 0xca);
        assert_eq!(&out[1..], &1.5f32.to_be_bytes());
    }
}
