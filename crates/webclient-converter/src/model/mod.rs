//! Domain model consumed by the converters.
//!
//! These are read-only snapshots handed over by the collaborator services.
//! Timestamps are milliseconds since the Unix epoch.

mod bitmap;
mod conversation;
mod message;
mod receiver;

pub use bitmap::Bitmap;
pub use conversation::{
    ConversationModel, ConversationTags, DeviceInfo, DndMode, MdmRestrictions,
    NotificationOverride, ProfileModel,
};
pub use message::{
    AudioData, FileData, ForwardSecurityStatusData, GroupCallStatus, GroupCallStatusData,
    GroupStatusData, LocationData, MessageData, MessageKind, MessageModel, MessageState,
    MessageType, ReactionEvent, RenderingType, VideoData, ViewElement, VoipStatus, VoipStatusData,
};
pub use receiver::{
    ContactAccess, ContactModel, DistributionListModel, GroupModel, IdentityState, IdentityType,
    LabeledValue, Receiver, SystemContactDetails, VerificationLevel,
};
