use crate::config::ReactionGeneration;
use crate::model::MessageState;

/// Wire name of a delivery state.
///
/// Several stored states share one wire bucket. The legacy generation keeps
/// acknowledge and decline distinct because those clients show them as
/// states rather than as reactions.
pub fn convert(state: MessageState, generation: ReactionGeneration) -> &'static str {
    match state {
        MessageState::UserAck if generation == ReactionGeneration::Legacy => "user-ack",
        MessageState::UserDec if generation == ReactionGeneration::Legacy => "user-dec",
        MessageState::Read
        | MessageState::UserAck
        | MessageState::UserDec
        | MessageState::Consumed => "read",
        MessageState::SendFailed | MessageState::FsKeyMismatch => "send-failed",
        MessageState::Pending | MessageState::Transcoding | MessageState::Uploading => "pending",
        MessageState::Sending => "sending",
        MessageState::Sent => "sent",
        MessageState::Delivered => "delivered",
    }
}
