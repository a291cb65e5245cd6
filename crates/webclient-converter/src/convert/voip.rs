//! Call status and reject reason codes.

use crate::error::{ConversionError, Result};
use crate::model::VoipStatus;

/// Why the callee rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Unknown,
    Busy,
    Timeout,
    Rejected,
    Disabled,
    OffHours,
}

impl RejectReason {
    pub fn code(self) -> i32 {
        match self {
            RejectReason::Unknown => 0,
            RejectReason::Busy => 1,
            RejectReason::Timeout => 2,
            RejectReason::Rejected => 3,
            RejectReason::Disabled => 4,
            RejectReason::OffHours => 5,
        }
    }
}

impl TryFrom<u8> for RejectReason {
    type Error = ConversionError;

    fn try_from(code: u8) -> Result<Self> {
        let reason = match code {
            0 => RejectReason::Unknown,
            1 => RejectReason::Busy,
            2 => RejectReason::Timeout,
            3 => RejectReason::Rejected,
            4 => RejectReason::Disabled,
            5 => RejectReason::OffHours,
            other => return Err(ConversionError::unknown_value("reject reason", other)),
        };
        Ok(reason)
    }
}

pub fn status_code(status: VoipStatus) -> i32 {
    match status {
        VoipStatus::Missed => 1,
        VoipStatus::Finished => 2,
        VoipStatus::Rejected => 3,
        VoipStatus::Aborted => 4,
    }
}
