//! Projection of the messenger domain model onto the webclient MessagePack
//! protocol.
//!
//! Converters in [`convert`] read live domain snapshots through the
//! collaborator traits in [`services`] and assemble lazy [`builder`] trees.
//! The transport consumes a tree once to obtain the bytes it sends.
//!
//! ```
//! use webclient_converter::builder::{MsgpackArrayBuilder, MsgpackObjectBuilder};
//! use webclient_msgpack::decode;
//!
//! let members: MsgpackArrayBuilder = ["ECHOECHO", "ABCDEFGH"].into_iter().collect();
//! let bytes = MsgpackObjectBuilder::new()
//!     .put("id", "42")
//!     .maybe_put("displayName", None::<&str>)
//!     .put("members", members)
//!     .consume();
//!
//! let value = decode(&bytes).unwrap();
//! assert_eq!(value.keys(), ["id", "members"]);
//! ```

pub mod builder;
pub mod config;
pub mod convert;
pub mod error;
pub mod imaging;
pub mod mime;
pub mod model;
pub mod protocol;
pub mod services;

pub use config::{ConverterConfig, ReactionGeneration};
pub use error::{ConversionError, MissingField};
pub use services::{ConversionContext, ServiceError, Services};
