//! Collaborator services the converters read from.
//!
//! Every converter receives a [`ConversionContext`] explicitly. Nothing in
//! this crate reaches for process-wide state, so tests can hand in fakes.

use thiserror::Error;

use crate::config::ConverterConfig;
use crate::error::ConversionError;
use crate::model::{
    Bitmap, ContactAccess, ContactModel, ConversationTags, DeviceInfo, DistributionListModel,
    GroupModel, MdmRestrictions, MessageModel, NotificationOverride, ProfileModel, ReactionEvent,
    Receiver, SystemContactDetails, ViewElement,
};

/// Failure reported by a collaborator service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0} not available")]
    Unavailable(&'static str),
    #[error("{0}")]
    Failed(String),
}

impl From<ServiceError> for ConversionError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(service) => ConversionError::service_unavailable(service),
            ServiceError::Failed(message) => ConversionError::new(message),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub trait ContactService {
    fn by_identity(&self, identity: &str) -> ServiceResult<Option<ContactModel>>;
    fn access(&self, identity: &str) -> ServiceResult<ContactAccess>;
    /// Avatar bitmap; `high_resolution == false` asks for the notification avatar.
    fn avatar(&self, contact: &ContactModel, high_resolution: bool)
        -> ServiceResult<Option<Bitmap>>;
}

pub trait GroupService {
    fn by_id(&self, id: i64) -> ServiceResult<Option<GroupModel>>;
    /// Whether the own identity created the group.
    fn is_creator(&self, group: &GroupModel) -> ServiceResult<bool>;
    /// Whether the own identity is still a member.
    fn is_member(&self, group: &GroupModel) -> ServiceResult<bool>;
    fn member_identities(&self, group: &GroupModel) -> ServiceResult<Vec<String>>;
    fn avatar(&self, group: &GroupModel, high_resolution: bool) -> ServiceResult<Option<Bitmap>>;
}

pub trait DistributionListService {
    fn by_id(&self, id: i64) -> ServiceResult<Option<DistributionListModel>>;
    fn member_identities(&self, list: &DistributionListModel) -> ServiceResult<Vec<String>>;
    fn avatar(
        &self,
        list: &DistributionListModel,
        high_resolution: bool,
    ) -> ServiceResult<Option<Bitmap>>;
}

pub trait ConversationService {
    fn tags(&self, receiver: &Receiver) -> ServiceResult<ConversationTags>;
}

pub trait PreferenceService {
    fn private_chats_hidden(&self) -> ServiceResult<bool>;
    fn voip_enabled(&self) -> ServiceResult<bool>;
    fn voip_force_turn(&self) -> ServiceResult<bool>;
    fn large_single_emoji(&self) -> ServiceResult<bool>;
    fn show_inactive_ids(&self) -> ServiceResult<bool>;
    /// Whether avatars of linked system contacts override custom ones.
    fn system_contact_avatars(&self) -> ServiceResult<bool>;
}

pub trait FileService {
    fn message_thumbnail(&self, message: &MessageModel) -> ServiceResult<Option<Bitmap>>;
}

pub trait RingtoneService {
    /// Notification override for the conversation with the given unique id.
    fn notification_override(&self, unique_id: &str) -> ServiceResult<NotificationOverride>;
}

pub trait ReactionRepository {
    /// Reaction events of `message`, oldest first.
    fn reactions(&self, message: &MessageModel) -> ServiceResult<Vec<ReactionEvent>>;
}

pub trait MessageService {
    /// Looks up a message by its protocol id among the messages exchanged with `receiver`.
    fn by_api_message_id(
        &self,
        api_message_id: &str,
        receiver: &Receiver,
    ) -> ServiceResult<Option<MessageModel>>;
    /// Text representation as shown in the chat view.
    fn view_element(&self, message: &MessageModel) -> ServiceResult<ViewElement>;
}

pub trait UserService {
    fn identity(&self) -> ServiceResult<String>;
    fn profile(&self) -> ServiceResult<ProfileModel>;
    fn avatar(&self, high_resolution: bool) -> ServiceResult<Option<Bitmap>>;
}

pub trait HiddenChatService {
    fn has(&self, unique_id: &str) -> ServiceResult<bool>;
}

pub trait BlockedContactService {
    fn is_blocked(&self, identity: &str) -> ServiceResult<bool>;
}

pub trait SystemContactService {
    fn details(&self, lookup_key: &str) -> ServiceResult<SystemContactDetails>;
}

pub trait DeviceService {
    fn device_info(&self) -> ServiceResult<DeviceInfo>;
    fn mdm_restrictions(&self) -> ServiceResult<MdmRestrictions>;
}

/// Borrowed bundle of every collaborator a conversion may consult.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub contacts: &'a dyn ContactService,
    pub groups: &'a dyn GroupService,
    pub distribution_lists: &'a dyn DistributionListService,
    pub conversations: &'a dyn ConversationService,
    pub preferences: &'a dyn PreferenceService,
    pub files: &'a dyn FileService,
    pub ringtones: &'a dyn RingtoneService,
    pub reactions: &'a dyn ReactionRepository,
    pub messages: &'a dyn MessageService,
    pub user: &'a dyn UserService,
    pub hidden_chats: &'a dyn HiddenChatService,
    pub blocked_contacts: &'a dyn BlockedContactService,
    pub system_contacts: &'a dyn SystemContactService,
    pub device: &'a dyn DeviceService,
}

/// Everything a converter call depends on.
#[derive(Clone, Copy)]
pub struct ConversionContext<'a> {
    pub services: Services<'a>,
    pub config: &'a ConverterConfig,
}

impl<'a> ConversionContext<'a> {
    pub fn new(services: Services<'a>, config: &'a ConverterConfig) -> Self {
        Self { services, config }
    }
}
