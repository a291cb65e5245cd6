//! `MsgPackDecoder` — MessagePack reader producing [`PackValue`] trees.

use webclient_buffers::Reader;

use crate::constants::*;
use crate::{MsgPackError, PackValue};

/// Decodes a single MessagePack document.
///
/// Extension types are not part of the webclient protocol and are rejected
/// as invalid bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsgPackDecoder;

/// Deepest array/map nesting accepted before decoding fails.
pub const MAX_DEPTH: usize = 512;

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes `bytes`, requiring that the document spans the whole input.
    pub fn decode(&self, bytes: &[u8]) -> Result<PackValue, MsgPackError> {
        let mut reader = Reader::new(bytes);
        let value = self.read_any(&mut reader, 0)?;
        match reader.size() {
            0 => Ok(value),
            rest => Err(MsgPackError::TrailingBytes(rest)),
        }
    }

    /// Reads one value nested `depth` containers deep.
    pub fn read_any(&self, r: &mut Reader<'_>, depth: usize) -> Result<PackValue, MsgPackError> {
        let offset = r.x;
        let byte = r.u8()?;
        let value = match byte {
            0x00..=POSITIVE_FIXINT_MAX => PackValue::Integer(byte as i64),
            0x80..=0x8f => self.read_obj(r, (byte & 0x0f) as usize, depth)?,
            0x90..=0x9f => self.read_arr(r, (byte & 0x0f) as usize, depth)?,
            0xa0..=0xbf => self.read_str(r, (byte & 0x1f) as usize)?,
            NIL => PackValue::Null,
            FALSE => PackValue::Bool(false),
            TRUE => PackValue::Bool(true),
            BIN8 => {
                let length = r.u8()? as usize;
                PackValue::Bytes(r.buf(length)?.to_vec())
            }
            BIN16 => {
                let length = r.u16()? as usize;
                PackValue::Bytes(r.buf(length)?.to_vec())
            }
            BIN32 => {
                let length = r.u32()? as usize;
                PackValue::Bytes(r.buf(length)?.to_vec())
            }
            FLOAT32 => PackValue::Float32(r.f32()?),
            FLOAT64 => PackValue::Float(r.f64()?),
            UINT8 => PackValue::Integer(r.u8()? as i64),
            UINT16 => PackValue::Integer(r.u16()? as i64),
            UINT32 => PackValue::Integer(r.u32()? as i64),
            UINT64 => {
                let uint = r.u64()?;
                match i64::try_from(uint) {
                    Ok(int) => PackValue::Integer(int),
                    Err(_) => PackValue::UInteger(uint),
                }
            }
            INT8 => PackValue::Integer(r.i8()? as i64),
            INT16 => PackValue::Integer(r.i16()? as i64),
            INT32 => PackValue::Integer(r.i32()? as i64),
            INT64 => PackValue::Integer(r.i64()?),
            STR8 => {
                let length = r.u8()? as usize;
                self.read_str(r, length)?
            }
            STR16 => {
                let length = r.u16()? as usize;
                self.read_str(r, length)?
            }
            STR32 => {
                let length = r.u32()? as usize;
                self.read_str(r, length)?
            }
            ARRAY16 => {
                let length = r.u16()? as usize;
                self.read_arr(r, length, depth)?
            }
            ARRAY32 => {
                let length = r.u32()? as usize;
                self.read_arr(r, length, depth)?
            }
            MAP16 => {
                let length = r.u16()? as usize;
                self.read_obj(r, length, depth)?
            }
            MAP32 => {
                let length = r.u32()? as usize;
                self.read_obj(r, length, depth)?
            }
            NEGATIVE_FIXINT_MIN..=0xff => PackValue::Integer(byte as i8 as i64),
            _ => return Err(MsgPackError::InvalidByte { byte, offset }),
        };
        Ok(value)
    }

    fn read_str(&self, r: &mut Reader<'_>, length: usize) -> Result<PackValue, MsgPackError> {
        Ok(PackValue::Str(r.utf8(length)?.to_owned()))
    }

    fn enter(depth: usize) -> Result<usize, MsgPackError> {
        if depth >= MAX_DEPTH {
            return Err(MsgPackError::TooDeep(MAX_DEPTH));
        }
        Ok(depth + 1)
    }

    fn read_arr(
        &self,
        r: &mut Reader<'_>,
        length: usize,
        depth: usize,
    ) -> Result<PackValue, MsgPackError> {
        let depth = Self::enter(depth)?;
        // Every element takes at least one byte.
        let mut items = Vec::with_capacity(length.min(r.size()));
        for _ in 0..length {
            items.push(self.read_any(r, depth)?);
        }
        Ok(PackValue::Array(items))
    }

    fn read_obj(
        &self,
        r: &mut Reader<'_>,
        length: usize,
        depth: usize,
    ) -> Result<PackValue, MsgPackError> {
        let depth = Self::enter(depth)?;
        let mut entries = Vec::with_capacity(length.min(r.size() / 2));
        for _ in 0..length {
            let key = match self.read_any(r, depth)? {
                PackValue::Str(key) => key,
                _ => return Err(MsgPackError::InvalidKey),
            };
            let value = self.read_any(r, depth)?;
            entries.push((key, value));
        }
        Ok(PackValue::Object(entries))
    }
}
