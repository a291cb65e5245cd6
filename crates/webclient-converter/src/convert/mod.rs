//! Domain to wire converters.
//!
//! Entity converters return unconsumed builders so callers can embed them
//! into larger responses before encoding.

pub mod client_info;
pub mod contact;
pub mod conversation;
pub mod disconnect_reason;
pub mod distribution_list;
pub mod group;
pub mod message;
pub mod message_state;
pub mod message_type;
pub mod notification_settings;
pub mod profile;
pub mod quote;
pub mod reactions;
pub mod receiver;
pub mod thumbnail;
pub mod verification_level;
pub mod voip;

pub use message::DetailLevel;
pub use receiver::{ModelWrapper, ReceiverType};
