//! MessagePack encoding for the webclient wire layer.
//!
//! [`MsgPackEncoder`] is the low-level writer the converter layer drives
//! instruction by instruction. [`MsgPackDecoder`] turns a buffer back into a
//! [`PackValue`] tree, which is how consumers and tests inspect what was
//! produced.

mod constants;
mod decoder;
mod encoder;
mod error;
mod pack_value;

pub use decoder::{MsgPackDecoder, MAX_DEPTH};
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;
pub use pack_value::PackValue;

/// Branded MessagePack byte payload alias.
pub type MsgPack = Vec<u8>;

/// Encodes a value tree with a fresh encoder.
pub fn encode(value: &PackValue) -> MsgPack {
    MsgPackEncoder::new().encode(value)
}

/// Decodes a complete MessagePack document.
pub fn decode(bytes: &[u8]) -> Result<PackValue, MsgPackError> {
    MsgPackDecoder::new().decode(bytes)
}
