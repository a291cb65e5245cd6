use crate::model::VerificationLevel;

pub fn convert(level: VerificationLevel) -> i32 {
    match level {
        VerificationLevel::Unverified => 1,
        VerificationLevel::ServerVerified => 2,
        VerificationLevel::FullyVerified => 3,
    }
}
