use crate::error::{ConversionError, Result};

/// Why the app closes a webclient session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    SessionStopped,
    SessionDeleted,
    WebclientDisabled,
    SessionReplaced,
    OutOfMemory,
    InternalError,
}

impl DisconnectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DisconnectReason::SessionStopped => "stop",
            DisconnectReason::SessionDeleted => "delete",
            DisconnectReason::WebclientDisabled => "disable",
            DisconnectReason::SessionReplaced => "replace",
            DisconnectReason::OutOfMemory => "outOfMemory",
            DisconnectReason::InternalError => "error",
        }
    }
}

impl TryFrom<i32> for DisconnectReason {
    type Error = ConversionError;

    fn try_from(code: i32) -> Result<Self> {
        let reason = match code {
            1 => DisconnectReason::SessionStopped,
            2 => DisconnectReason::SessionDeleted,
            3 => DisconnectReason::WebclientDisabled,
            4 => DisconnectReason::SessionReplaced,
            5 => DisconnectReason::OutOfMemory,
            6 => DisconnectReason::InternalError,
            other => return Err(ConversionError::unknown_value("disconnect reason", other)),
        };
        Ok(reason)
    }
}

/// Wire string for a raw disconnect code.
pub fn convert(code: i32) -> Result<&'static str> {
    DisconnectReason::try_from(code).map(DisconnectReason::as_str)
}
