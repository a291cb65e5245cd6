use crate::error::{ConversionError, Result};
use crate::model::MessageType;

/// Wire name of a (virtual) message type.
///
/// Types the remote client has no representation for fail instead of being
/// mapped to a guess.
pub fn convert(message_type: MessageType) -> Result<&'static str> {
    let name = match message_type {
        MessageType::Text => "text",
        MessageType::Image => "image",
        MessageType::Video => "video",
        MessageType::VoiceMessage => "audio",
        MessageType::Location => "location",
        MessageType::Status => "status",
        MessageType::Ballot => "ballot",
        MessageType::File => "file",
        MessageType::VoipStatus => "voipStatus",
        MessageType::Contact
        | MessageType::DateSeparator
        | MessageType::GroupStatus
        | MessageType::GroupCallStatus
        | MessageType::ForwardSecurityStatus => {
            return Err(ConversionError::unknown_value("message type", message_type))
        }
    };
    Ok(name)
}
