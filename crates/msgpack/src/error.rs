//! MessagePack decoder error type.

use thiserror::Error;
use webclient_buffers::BufferError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("map key is not a string")]
    InvalidKey,
    #[error("invalid MessagePack byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing bytes after document")]
    TrailingBytes(usize),
}

impl From<BufferError> for MsgPackError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => MsgPackError::UnexpectedEof,
            BufferError::InvalidUtf8 => MsgPackError::InvalidUtf8,
        }
    }
}
