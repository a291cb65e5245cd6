//! Conversation list entries.

use crate::builder::{MsgpackBuilder, MsgpackObjectBuilder};
use crate::error::Result;
use crate::model::{ConversationModel, Receiver};
use crate::services::ConversionContext;

use super::message::{self, DetailLevel};
use super::receiver::{ModelWrapper, ID, TYPE};
use super::{contact, distribution_list, group, notification_settings};

const POSITION: &str = "position";
const MESSAGE_COUNT: &str = "messageCount";
const UNREAD_COUNT: &str = "unreadCount";
const LATEST_MESSAGE: &str = "latestMessage";
const RECEIVER: &str = "receiver";
const AVATAR: &str = "avatar";
const NOTIFICATIONS: &str = "notifications";
const IS_STARRED: &str = "isStarred";
const IS_UNREAD: &str = "isUnread";

/// Optional parts of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversationOptions {
    /// Embed the full receiver object.
    pub include_receiver: bool,
    /// Embed the low resolution avatar.
    pub include_avatar: bool,
    /// Avatar bound; the configured low resolution bound when `None`.
    pub max_avatar_size: Option<u32>,
}

fn convert_receiver(ctx: &ConversionContext<'_>, receiver: &Receiver) -> Result<MsgpackObjectBuilder> {
    match receiver {
        Receiver::Contact(contact) => contact::convert(ctx, contact),
        Receiver::Group(group) => group::convert(ctx, group),
        Receiver::DistributionList(list) => distribution_list::convert(ctx, list),
    }
}

pub fn convert(
    ctx: &ConversionContext<'_>,
    conversation: &ConversationModel,
    options: ConversationOptions,
) -> Result<MsgpackObjectBuilder> {
    let services = &ctx.services;
    let receiver = &conversation.receiver;
    let wrapper = ModelWrapper::from(receiver);
    let tags = services.conversations.tags(receiver)?;
    let notifications = services.ringtones.notification_override(&wrapper.unique_id())?;

    let latest_message = conversation
        .latest_message
        .as_ref()
        .map(|latest| message::convert(ctx, latest, receiver, false, DetailLevel::NoQuote))
        .transpose()?;
    let receiver_builder = if options.include_receiver {
        Some(convert_receiver(ctx, receiver)?)
    } else {
        None
    };
    let avatar = if options.include_avatar {
        wrapper.avatar(ctx, false, options.max_avatar_size)?
    } else {
        None
    };

    Ok(MsgpackObjectBuilder::new()
        .put(TYPE, wrapper.receiver_type().as_str())
        .put(ID, wrapper.id())
        .put(POSITION, conversation.position)
        .put(MESSAGE_COUNT, conversation.message_count)
        .put(UNREAD_COUNT, conversation.unread_count)
        .maybe_put(LATEST_MESSAGE, latest_message)
        .maybe_put(RECEIVER, receiver_builder)
        .maybe_put(AVATAR, avatar)
        .put(
            NOTIFICATIONS,
            notification_settings::convert(
                &notifications,
                matches!(receiver, Receiver::Group(_)),
            ),
        )
        .put(IS_STARRED, tags.pinned)
        .put(IS_UNREAD, tags.unread))
}

pub fn convert_all(
    ctx: &ConversionContext<'_>,
    conversations: &[ConversationModel],
    options: ConversationOptions,
) -> Result<Vec<MsgpackBuilder>> {
    conversations
        .iter()
        .map(|conversation| convert(ctx, conversation, options).map(MsgpackBuilder::from))
        .collect()
}
