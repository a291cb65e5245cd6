use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{required, ConversionError, MissingField};

/// Stored message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Text,
    Image,
    Video,
    VoiceMessage,
    Location,
    Contact,
    Status,
    Ballot,
    File,
    VoipStatus,
    DateSeparator,
    GroupStatus,
    GroupCallStatus,
    ForwardSecurityStatus,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageType::Text => "TEXT",
            MessageType::Image => "IMAGE",
            MessageType::Video => "VIDEO",
            MessageType::VoiceMessage => "VOICEMESSAGE",
            MessageType::Location => "LOCATION",
            MessageType::Contact => "CONTACT",
            MessageType::Status => "STATUS",
            MessageType::Ballot => "BALLOT",
            MessageType::File => "FILE",
            MessageType::VoipStatus => "VOIP_STATUS",
            MessageType::DateSeparator => "DATE_SEPARATOR",
            MessageType::GroupStatus => "GROUP_STATUS",
            MessageType::GroupCallStatus => "GROUP_CALL_STATUS",
            MessageType::ForwardSecurityStatus => "FORWARD_SECURITY_STATUS",
        };
        f.write_str(name)
    }
}

/// Stored delivery state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageState {
    Sending,
    SendFailed,
    Pending,
    Transcoding,
    Uploading,
    Sent,
    Delivered,
    Read,
    UserAck,
    UserDec,
    Consumed,
    FsKeyMismatch,
}

impl FromStr for MessageState {
    type Err = ConversionError;

    /// Parses the stored state name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = match s {
            "SENDING" => MessageState::Sending,
            "SENDFAILED" => MessageState::SendFailed,
            "PENDING" => MessageState::Pending,
            "TRANSCODING" => MessageState::Transcoding,
            "UPLOADING" => MessageState::Uploading,
            "SENT" => MessageState::Sent,
            "DELIVERED" => MessageState::Delivered,
            "READ" => MessageState::Read,
            "USERACK" => MessageState::UserAck,
            "USERDEC" => MessageState::UserDec,
            "CONSUMED" => MessageState::Consumed,
            "FS_KEY_MISMATCH" => MessageState::FsKeyMismatch,
            other => return Err(ConversionError::unknown_value("message state", other)),
        };
        Ok(state)
    }
}

/// How a file message asks to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingType {
    #[default]
    Default,
    Media,
    Sticker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileData {
    pub mime_type: String,
    pub file_name: Option<String>,
    pub file_size: i64,
    pub rendering_type: RenderingType,
    pub caption: Option<String>,
    /// Media duration in seconds, from the file metadata.
    pub duration: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoData {
    /// Seconds.
    pub duration: i32,
    /// Bytes, 0 when unknown.
    pub size: i64,
}

impl VideoData {
    pub fn from_file_data(data: &FileData) -> Self {
        Self {
            duration: data.duration.unwrap_or(0),
            size: data.file_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioData {
    /// Seconds.
    pub duration: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationData {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f32,
    pub address: Option<String>,
    pub poi: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoipStatus {
    Missed,
    Finished,
    Rejected,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoipStatusData {
    pub status: VoipStatus,
    /// Call duration in seconds, when the call was established.
    pub duration: Option<i32>,
    /// Raw reject reason code, for rejected calls.
    pub reason: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStatusData {
    pub status_type: String,
    pub identity: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupCallStatus {
    Started,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCallStatusData {
    pub status: GroupCallStatus,
    pub caller_identity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardSecurityStatusData {
    pub status_type: i32,
}

/// Type-specific message payload.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageData {
    File(FileData),
    Video(VideoData),
    Audio(AudioData),
    Location(LocationData),
    VoipStatus(VoipStatusData),
    GroupStatus(GroupStatusData),
    GroupCallStatus(GroupCallStatusData),
    ForwardSecurityStatus(ForwardSecurityStatusData),
}

/// Which conversation a message belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    Contact,
    Group {
        group_id: i64,
        /// Legacy per-member acknowledgement states keyed by identity.
        member_states: BTreeMap<String, MessageState>,
    },
    DistributionList {
        distribution_list_id: i64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageModel {
    pub id: i64,
    pub api_message_id: Option<String>,
    pub kind: MessageKind,
    pub message_type: MessageType,
    /// Partner identity: the contact for direct messages, the sender for
    /// incoming group messages.
    pub identity: Option<String>,
    pub body: Option<String>,
    pub caption: Option<String>,
    pub quoted_message_id: Option<String>,
    pub is_outbox: bool,
    pub is_read: bool,
    pub is_status_message: bool,
    /// Synthetic marker placed above the first unread message.
    pub is_first_unread_marker: bool,
    pub state: Option<MessageState>,
    pub created_at: Option<i64>,
    pub posted_at: Option<i64>,
    pub modified_at: Option<i64>,
    pub edited_at: Option<i64>,
    pub data: Option<MessageData>,
}

impl MessageModel {
    pub fn is_group_message(&self) -> bool {
        matches!(self.kind, MessageKind::Group { .. })
    }

    pub fn is_unread(&self) -> bool {
        !self.is_outbox && !self.is_read && !self.is_status_message
    }

    /// Whether `other` lives in the same conversation.
    pub fn same_conversation(&self, other: &MessageModel) -> bool {
        match (&self.kind, &other.kind) {
            (MessageKind::Contact, MessageKind::Contact) => self.identity == other.identity,
            (MessageKind::Group { group_id: a, .. }, MessageKind::Group { group_id: b, .. }) => {
                a == b
            }
            (
                MessageKind::DistributionList {
                    distribution_list_id: a,
                },
                MessageKind::DistributionList {
                    distribution_list_id: b,
                },
            ) => a == b,
            _ => false,
        }
    }

    pub fn file_data(&self) -> Result<&FileData, MissingField> {
        required(
            match &self.data {
                Some(MessageData::File(data)) => Some(data),
                _ => None,
            },
            "fileData",
        )
    }

    pub fn video_data(&self) -> Option<VideoData> {
        match &self.data {
            Some(MessageData::Video(data)) => Some(*data),
            _ => None,
        }
    }

    pub fn audio_data(&self) -> Option<AudioData> {
        match &self.data {
            Some(MessageData::Audio(data)) => Some(*data),
            _ => None,
        }
    }

    pub fn location_data(&self) -> Option<&LocationData> {
        match &self.data {
            Some(MessageData::Location(data)) => Some(data),
            _ => None,
        }
    }

    pub fn voip_status_data(&self) -> Option<VoipStatusData> {
        match &self.data {
            Some(MessageData::VoipStatus(data)) => Some(*data),
            _ => None,
        }
    }

    pub fn group_status_data(&self) -> Result<&GroupStatusData, MissingField> {
        required(
            match &self.data {
                Some(MessageData::GroupStatus(data)) => Some(data),
                _ => None,
            },
            "groupStatusData",
        )
    }

    pub fn group_call_status_data(&self) -> Result<&GroupCallStatusData, MissingField> {
        required(
            match &self.data {
                Some(MessageData::GroupCallStatus(data)) => Some(data),
                _ => None,
            },
            "groupCallStatusData",
        )
    }

    pub fn forward_security_status_data(
        &self,
    ) -> Result<&ForwardSecurityStatusData, MissingField> {
        required(
            match &self.data {
                Some(MessageData::ForwardSecurityStatus(data)) => Some(data),
                _ => None,
            },
            "forwardSecurityStatusData",
        )
    }
}

/// One identity's emoji reaction to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub emoji_sequence: String,
    pub sender_identity: String,
    pub reacted_at: i64,
}

/// Rendered representation of a message, as shown in a chat list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewElement {
    pub text: Option<String>,
    pub placeholder: Option<String>,
}
