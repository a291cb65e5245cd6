use std::fmt;

use crate::error::ConversionError;

/// How far a contact's public key has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationLevel {
    Unverified,
    ServerVerified,
    FullyVerified,
}

impl TryFrom<i32> for VerificationLevel {
    type Error = ConversionError;

    /// Parses the stored level code.
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VerificationLevel::Unverified),
            1 => Ok(VerificationLevel::ServerVerified),
            2 => Ok(VerificationLevel::FullyVerified),
            other => Err(ConversionError::unknown_value("verification level", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityState {
    Active,
    Inactive,
    Invalid,
}

impl fmt::Display for IdentityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentityState::Active => "ACTIVE",
            IdentityState::Inactive => "INACTIVE",
            IdentityState::Invalid => "INVALID",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityType {
    Normal,
    Work,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactModel {
    pub identity: String,
    pub public_key: Vec<u8>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub public_nickname: Option<String>,
    pub verification_level: VerificationLevel,
    pub state: IdentityState,
    pub identity_type: IdentityType,
    /// Whether the contact is part of the user's work directory.
    pub is_work: bool,
    pub feature_mask: i64,
    /// ARGB color used in the light theme.
    pub color_light: u32,
    pub is_hidden: bool,
    /// Lookup key of the linked system address-book entry.
    pub system_contact_lookup_key: Option<String>,
}

impl ContactModel {
    /// Gateway identities start with `*`.
    pub fn is_gateway(&self) -> bool {
        self.identity.starts_with('*')
    }

    pub fn is_linked_to_system_contact(&self) -> bool {
        self.system_contact_lookup_key.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactAccess {
    pub can_delete: bool,
}

/// One entry of a system contact, e.g. a labeled phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemContactDetails {
    pub phone_numbers: Vec<LabeledValue>,
    pub emails: Vec<LabeledValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupModel {
    pub id: i64,
    pub name: Option<String>,
    pub creator_identity: String,
    pub created_at: Option<i64>,
    pub color_light: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionListModel {
    pub id: i64,
    pub name: Option<String>,
    pub created_at: Option<i64>,
    pub color_light: u32,
}

/// A message receiver: the counterpart of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Receiver {
    Contact(ContactModel),
    Group(GroupModel),
    DistributionList(DistributionListModel),
}

impl From<ContactModel> for Receiver {
    fn from(contact: ContactModel) -> Self {
        Receiver::Contact(contact)
    }
}

impl From<GroupModel> for Receiver {
    fn from(group: GroupModel) -> Self {
        Receiver::Group(group)
    }
}

impl From<DistributionListModel> for Receiver {
    fn from(list: DistributionListModel) -> Self {
        Receiver::DistributionList(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_level_codes_fail_closed() {
        assert_eq!(
            VerificationLevel::try_from(2),
            Ok(VerificationLevel::FullyVerified)
        );
        assert!(VerificationLevel::try_from(3).is_err());
        assert!(VerificationLevel::try_from(-1).is_err());
    }
}
