#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};

use image::DynamicImage;
use webclient_converter::builder::MsgpackObjectBuilder;
use webclient_converter::model::{
    Bitmap, ContactAccess, ContactModel, ConversationTags, DeviceInfo, DistributionListModel,
    FileData, GroupModel, IdentityState, IdentityType, MdmRestrictions, MessageData, MessageKind,
    MessageModel, MessageState, MessageType, NotificationOverride, ProfileModel, ReactionEvent,
    Receiver, RenderingType, SystemContactDetails, VerificationLevel, ViewElement,
};
use webclient_converter::services::{
    BlockedContactService, ContactService, ConversationService, DeviceService,
    DistributionListService, FileService, GroupService, HiddenChatService, MessageService,
    PreferenceService, ReactionRepository, RingtoneService, ServiceError, ServiceResult,
    SystemContactService, UserService,
};
use webclient_converter::{ConversionContext, ConverterConfig, Services};
use webclient_msgpack::{decode, PackValue};

pub const ME: &str = "MEMEMEME";
pub const ECHO: &str = "ECHOECHO";
pub const ALICE: &str = "AAAAAAAA";
pub const BOB: &str = "BBBBBBBB";

/// In-memory stand-in for every collaborator service.
#[derive(Default)]
pub struct Fakes {
    pub contacts: Vec<ContactModel>,
    pub undeletable: HashSet<String>,
    pub blocked: HashSet<String>,
    pub groups: Vec<GroupModel>,
    pub group_members: HashMap<i64, Vec<String>>,
    pub created_groups: HashSet<i64>,
    pub left_groups: HashSet<i64>,
    pub lists: Vec<DistributionListModel>,
    pub list_members: HashMap<i64, Vec<String>>,
    pub hidden_chats: HashSet<String>,
    pub private_chats_hidden: bool,
    pub system_contact_avatars: bool,
    pub tags: ConversationTags,
    pub notifications: NotificationOverride,
    pub reactions: HashMap<i64, Vec<ReactionEvent>>,
    pub messages: Vec<MessageModel>,
    pub thumbnails: HashMap<i64, (u32, u32)>,
    pub broken_thumbnails: HashSet<i64>,
    /// Avatar sizes keyed by receiver id.
    pub avatars: HashMap<String, (u32, u32)>,
    pub system_contacts: HashMap<String, SystemContactDetails>,
    pub mdm: MdmRestrictions,
    pub push_token: Option<String>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            contacts: vec![contact(ECHO), contact(ALICE), contact(BOB)],
            ..Self::default()
        }
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            contacts: self,
            groups: self,
            distribution_lists: self,
            conversations: self,
            preferences: self,
            files: self,
            ringtones: self,
            reactions: self,
            messages: self,
            user: self,
            hidden_chats: self,
            blocked_contacts: self,
            system_contacts: self,
            device: self,
        }
    }

    pub fn context<'a>(&'a self, config: &'a ConverterConfig) -> ConversionContext<'a> {
        ConversionContext::new(self.services(), config)
    }

    fn avatar_for(&self, id: &str) -> Option<Bitmap> {
        self.avatars
            .get(id)
            .map(|&(width, height)| Bitmap::new(DynamicImage::new_rgba8(width, height)))
    }
}

impl ContactService for Fakes {
    fn by_identity(&self, identity: &str) -> ServiceResult<Option<ContactModel>> {
        Ok(self.contacts.iter().find(|c| c.identity == identity).cloned())
    }

    fn access(&self, identity: &str) -> ServiceResult<ContactAccess> {
        Ok(ContactAccess {
            can_delete: !self.undeletable.contains(identity),
        })
    }

    fn avatar(&self, contact: &ContactModel, _high_resolution: bool) -> ServiceResult<Option<Bitmap>> {
        Ok(self.avatar_for(&contact.identity))
    }
}

impl GroupService for Fakes {
    fn by_id(&self, id: i64) -> ServiceResult<Option<GroupModel>> {
        Ok(self.groups.iter().find(|g| g.id == id).cloned())
    }

    fn is_creator(&self, group: &GroupModel) -> ServiceResult<bool> {
        Ok(self.created_groups.contains(&group.id))
    }

    fn is_member(&self, group: &GroupModel) -> ServiceResult<bool> {
        Ok(!self.left_groups.contains(&group.id))
    }

    fn member_identities(&self, group: &GroupModel) -> ServiceResult<Vec<String>> {
        Ok(self.group_members.get(&group.id).cloned().unwrap_or_default())
    }

    fn avatar(&self, group: &GroupModel, _high_resolution: bool) -> ServiceResult<Option<Bitmap>> {
        Ok(self.avatar_for(&group.id.to_string()))
    }
}

impl DistributionListService for Fakes {
    fn by_id(&self, id: i64) -> ServiceResult<Option<DistributionListModel>> {
        Ok(self.lists.iter().find(|l| l.id == id).cloned())
    }

    fn member_identities(&self, list: &DistributionListModel) -> ServiceResult<Vec<String>> {
        Ok(self.list_members.get(&list.id).cloned().unwrap_or_default())
    }

    fn avatar(
        &self,
        _list: &DistributionListModel,
        _high_resolution: bool,
    ) -> ServiceResult<Option<Bitmap>> {
        Ok(None)
    }
}

impl ConversationService for Fakes {
    fn tags(&self, _receiver: &Receiver) -> ServiceResult<ConversationTags> {
        Ok(self.tags)
    }
}

impl PreferenceService for Fakes {
    fn private_chats_hidden(&self) -> ServiceResult<bool> {
        Ok(self.private_chats_hidden)
    }

    fn voip_enabled(&self) -> ServiceResult<bool> {
        Ok(true)
    }

    fn voip_force_turn(&self) -> ServiceResult<bool> {
        Ok(false)
    }

    fn large_single_emoji(&self) -> ServiceResult<bool> {
        Ok(true)
    }

    fn show_inactive_ids(&self) -> ServiceResult<bool> {
        Ok(false)
    }

    fn system_contact_avatars(&self) -> ServiceResult<bool> {
        Ok(self.system_contact_avatars)
    }
}

impl FileService for Fakes {
    fn message_thumbnail(&self, message: &MessageModel) -> ServiceResult<Option<Bitmap>> {
        if self.broken_thumbnails.contains(&message.id) {
            return Err(ServiceError::Failed("thumbnail file is corrupt".to_owned()));
        }
        Ok(self
            .thumbnails
            .get(&message.id)
            .map(|&(width, height)| Bitmap::new(DynamicImage::new_rgb8(width, height))))
    }
}

impl RingtoneService for Fakes {
    fn notification_override(&self, _unique_id: &str) -> ServiceResult<NotificationOverride> {
        Ok(self.notifications)
    }
}

impl ReactionRepository for Fakes {
    fn reactions(&self, message: &MessageModel) -> ServiceResult<Vec<ReactionEvent>> {
        Ok(self.reactions.get(&message.id).cloned().unwrap_or_default())
    }
}

impl MessageService for Fakes {
    fn by_api_message_id(
        &self,
        api_message_id: &str,
        _receiver: &Receiver,
    ) -> ServiceResult<Option<MessageModel>> {
        Ok(self
            .messages
            .iter()
            .find(|m| m.api_message_id.as_deref() == Some(api_message_id))
            .cloned())
    }

    fn view_element(&self, message: &MessageModel) -> ServiceResult<ViewElement> {
        Ok(match message.message_type {
            MessageType::Text => ViewElement {
                text: message.body.clone(),
                placeholder: None,
            },
            MessageType::GroupStatus => ViewElement {
                text: Some("Alice joined the group".to_owned()),
                placeholder: None,
            },
            _ => ViewElement {
                text: None,
                placeholder: Some(format!("{} message", message.message_type)),
            },
        })
    }
}

impl UserService for Fakes {
    fn identity(&self) -> ServiceResult<String> {
        Ok(ME.to_owned())
    }

    fn profile(&self) -> ServiceResult<ProfileModel> {
        Ok(ProfileModel {
            identity: ME.to_owned(),
            public_key: vec![7; 32],
            public_nickname: Some("Me".to_owned()),
        })
    }

    fn avatar(&self, _high_resolution: bool) -> ServiceResult<Option<Bitmap>> {
        Ok(self.avatar_for(ME))
    }
}

impl HiddenChatService for Fakes {
    fn has(&self, unique_id: &str) -> ServiceResult<bool> {
        Ok(self.hidden_chats.contains(unique_id))
    }
}

impl BlockedContactService for Fakes {
    fn is_blocked(&self, identity: &str) -> ServiceResult<bool> {
        Ok(self.blocked.contains(identity))
    }
}

impl SystemContactService for Fakes {
    fn details(&self, lookup_key: &str) -> ServiceResult<SystemContactDetails> {
        self.system_contacts
            .get(lookup_key)
            .cloned()
            .ok_or(ServiceError::Unavailable("system contacts"))
    }
}

impl DeviceService for Fakes {
    fn device_info(&self) -> ServiceResult<DeviceInfo> {
        Ok(DeviceInfo {
            device: "Pixel 7".to_owned(),
            os: "android".to_owned(),
            os_version: "14".to_owned(),
            app_version: "5.2.1".to_owned(),
            push_token: self.push_token.clone(),
        })
    }

    fn mdm_restrictions(&self) -> ServiceResult<MdmRestrictions> {
        Ok(self.mdm)
    }
}

pub fn contact(identity: &str) -> ContactModel {
    ContactModel {
        identity: identity.to_owned(),
        public_key: vec![1; 32],
        first_name: None,
        last_name: None,
        public_nickname: None,
        verification_level: VerificationLevel::ServerVerified,
        state: IdentityState::Active,
        identity_type: IdentityType::Normal,
        is_work: false,
        feature_mask: 0x1f,
        color_light: 0xff00_7f7f,
        is_hidden: false,
        system_contact_lookup_key: None,
    }
}

pub fn group(id: i64, name: &str) -> GroupModel {
    GroupModel {
        id,
        name: Some(name.to_owned()),
        creator_identity: ALICE.to_owned(),
        created_at: Some(1_600_000_000_000),
        color_light: 0xff12_3456,
    }
}

pub fn distribution_list(id: i64, name: &str) -> DistributionListModel {
    DistributionListModel {
        id,
        name: Some(name.to_owned()),
        created_at: None,
        color_light: 0xffab_cdef,
    }
}

pub fn text_message(id: i64, body: &str) -> MessageModel {
    MessageModel {
        id,
        api_message_id: Some(format!("{id:016x}")),
        kind: MessageKind::Contact,
        message_type: MessageType::Text,
        identity: Some(ECHO.to_owned()),
        body: Some(body.to_owned()),
        caption: None,
        quoted_message_id: None,
        is_outbox: false,
        is_read: true,
        is_status_message: false,
        is_first_unread_marker: false,
        state: Some(MessageState::Read),
        created_at: Some(1_700_000_000_000),
        posted_at: Some(1_700_000_001_000),
        modified_at: None,
        edited_at: None,
        data: None,
    }
}

pub fn file_message(id: i64, mime_type: &str, rendering_type: RenderingType) -> MessageModel {
    MessageModel {
        message_type: MessageType::File,
        body: None,
        data: Some(MessageData::File(FileData {
            mime_type: mime_type.to_owned(),
            file_name: None,
            file_size: 2048,
            rendering_type,
            caption: None,
            duration: None,
        })),
        ..text_message(id, "")
    }
}

pub fn group_message(id: i64, group_id: i64, body: &str) -> MessageModel {
    MessageModel {
        kind: MessageKind::Group {
            group_id,
            member_states: BTreeMap::new(),
        },
        identity: Some(ALICE.to_owned()),
        ..text_message(id, body)
    }
}

pub fn echo_receiver() -> Receiver {
    Receiver::Contact(contact(ECHO))
}

pub fn decoded(builder: MsgpackObjectBuilder) -> PackValue {
    decode(&builder.consume()).expect("builder output must decode")
}

pub fn str_at<'a>(value: &'a PackValue, path: &str) -> Option<&'a str> {
    value.path(path).and_then(PackValue::as_str)
}

pub fn int_at(value: &PackValue, path: &str) -> Option<i64> {
    value.path(path).and_then(PackValue::as_i64)
}

pub fn bool_at(value: &PackValue, path: &str) -> Option<bool> {
    value.path(path).and_then(PackValue::as_bool)
}
