use super::message::MessageModel;
use super::receiver::Receiver;

/// One entry of the conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationModel {
    pub receiver: Receiver,
    pub position: i32,
    pub message_count: i64,
    pub unread_count: i64,
    pub latest_message: Option<MessageModel>,
}

/// User-assigned conversation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversationTags {
    pub pinned: bool,
    pub unread: bool,
}

/// Do-not-disturb state of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DndMode {
    #[default]
    Off,
    On,
    /// Muted until the given time (ms since the Unix epoch).
    Until(i64),
}

/// Per-conversation notification override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationOverride {
    pub sound_muted: bool,
    pub dnd: DndMode,
    /// Only notify on mentions while dnd is active. Groups only.
    pub mention_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileModel {
    pub identity: String,
    pub public_key: Vec<u8>,
    pub public_nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device: String,
    pub os: String,
    pub os_version: String,
    pub app_version: String,
    pub push_token: Option<String>,
}

/// Restrictions imposed by a device management profile.
///
/// `None` means the restriction is not configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MdmRestrictions {
    pub readonly_profile: Option<bool>,
    pub disable_add_contact: Option<bool>,
    pub disable_create_group: Option<bool>,
    pub disable_save_to_gallery: Option<bool>,
    pub disable_export: Option<bool>,
    pub disable_message_preview: Option<bool>,
    pub disable_calls: Option<bool>,
}

impl MdmRestrictions {
    pub fn is_empty(&self) -> bool {
        *self == MdmRestrictions::default()
    }
}
