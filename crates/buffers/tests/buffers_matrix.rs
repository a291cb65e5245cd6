//! Writer/Reader matrix over the widths the MessagePack layer uses.

use webclient_buffers::{BufferError, Reader, Writer};

#[test]
fn integers_round_trip_at_their_extremes() {
    let mut w = Writer::new();
    w.u8(u8::MAX);
    w.i8(i8::MIN);
    w.u16(u16::MAX);
    w.i16(i16::MIN);
    w.u32(u32::MAX);
    w.i32(i32::MIN);
    w.u64(u64::MAX);
    w.i64(i64::MIN);
    let data = w.flush();
    assert_eq!(data.len(), 1 + 1 + 2 + 2 + 4 + 4 + 8 + 8);

    let mut r = Reader::new(&data);
    assert_eq!(r.u8(), Ok(u8::MAX));
    assert_eq!(r.i8(), Ok(i8::MIN));
    assert_eq!(r.u16(), Ok(u16::MAX));
    assert_eq!(r.i16(), Ok(i16::MIN));
    assert_eq!(r.u32(), Ok(u32::MAX));
    assert_eq!(r.i32(), Ok(i32::MIN));
    assert_eq!(r.u64(), Ok(u64::MAX));
    assert_eq!(r.i64(), Ok(i64::MIN));
    assert_eq!(r.size(), 0);
}

#[test]
fn floats_round_trip_bit_exact() {
    let mut w = Writer::new();
    w.f32(-0.0);
    w.f32(f32::INFINITY);
    w.f64(47.376_887);
    w.f64(f64::MIN_POSITIVE);
    let data = w.flush();

    let mut r = Reader::new(&data);
    assert_eq!(r.f32().map(f32::to_bits), Ok((-0.0f32).to_bits()));
    assert_eq!(r.f32(), Ok(f32::INFINITY));
    assert_eq!(r.f64(), Ok(47.376_887));
    assert_eq!(r.f64(), Ok(f64::MIN_POSITIVE));
}

#[test]
fn marker_prefixed_values() {
    let mut w = Writer::new();
    w.u8u8(0xcc, 0xff);
    w.u8u16(0xcd, 0x0102);
    w.u8u64(0xcf, 1);
    w.u8f32(0xca, 1.5);
    let data = w.flush();
    assert_eq!(&data[..5], &[0xcc, 0xff, 0xcd, 0x01, 0x02]);
    assert_eq!(&data[5..14], &[0xcf, 0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(data[14], 0xca);
    assert_eq!(&data[15..], &1.5f32.to_be_bytes());
}

#[test]
fn strings_and_raw_bytes() {
    let mut w = Writer::new();
    assert_eq!(w.utf8("Grüezi 👋"), "Grüezi 👋".len());
    w.buf(&[0xde, 0xad]);
    let data = w.flush();

    let mut r = Reader::new(&data);
    assert_eq!(r.utf8("Grüezi 👋".len()), Ok("Grüezi 👋"));
    assert_eq!(r.peek(), Ok(0xde));
    assert_eq!(r.buf(2), Ok(&[0xde, 0xad][..]));
}

#[test]
fn short_input_is_an_error() {
    let data = [0x01, 0x02, 0x03];
    let mut r = Reader::new(&data);
    assert_eq!(r.u32(), Err(BufferError::EndOfBuffer));
    assert_eq!(r.x, 0);
    assert_eq!(r.u16(), Ok(0x0102));
    assert_eq!(r.buf(2), Err(BufferError::EndOfBuffer));
    assert_eq!(r.utf8(usize::MAX), Err(BufferError::EndOfBuffer));
    assert_eq!(r.u8(), Ok(0x03));
    assert_eq!(r.peek(), Err(BufferError::EndOfBuffer));
}

#[test]
fn invalid_utf8_is_an_error() {
    let data = [0xc3, 0x28];
    let mut r = Reader::new(&data);
    assert_eq!(r.utf8(2), Err(BufferError::InvalidUtf8));
}

#[test]
fn writer_reuses_its_buffer_across_flushes() {
    let mut w = Writer::with_capacity(4);
    for chunk in 0..10u8 {
        for byte in 0..50u8 {
            w.u8(chunk.wrapping_mul(byte));
        }
        let data = w.flush();
        assert_eq!(data.len(), 50);
        assert_eq!(data[49], chunk.wrapping_mul(49));
        assert!(w.is_empty());
    }
}
