//! Message projection.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::builder::{MsgpackArrayBuilder, MsgpackBuilder, MsgpackObjectBuilder};
use crate::config::ReactionGeneration;
use crate::error::{ConversionError, Result};
use crate::mime;
use crate::model::{
    AudioData, FileData, GroupCallStatus, LocationData, MessageKind, MessageModel, MessageState,
    MessageType, Receiver, RenderingType, VideoData, VoipStatusData,
};
use crate::services::ConversionContext;

use super::reactions::{self, LegacyReactions};
use super::voip::{self, RejectReason};
use super::{message_state, message_type, quote, thumbnail};

const ID: &str = "id";
const TYPE: &str = "type";
const BODY: &str = "body";
const QUOTE: &str = "quote";
const IS_OUTBOX: &str = "isOutbox";
const IS_STATUS: &str = "isStatus";
const PARTNER_ID: &str = "partnerId";
const IS_UNREAD: &str = "unread";
const STATE: &str = "state";
const REACTIONS: &str = "reactions";
const EMOJI_REACTIONS: &str = "emojiReactions";
const DATE: &str = "date";
const LAST_EDITED_AT: &str = "lastEditedAt";
const EVENTS: &str = "events";
const SORT_KEY: &str = "sortKey";
const THUMBNAIL: &str = "thumbnail";
const CAPTION: &str = "caption";
const STATUS_TYPE: &str = "statusType";
const DATA_FILE: &str = "file";
const DATA_AUDIO: &str = "audio";
const DATA_VIDEO: &str = "video";
const DATA_LOCATION: &str = "location";
const DATA_VOIP_STATUS: &str = "voip";
const DURATION: &str = "duration";
const SIZE: &str = "size";
const FILE_NAME: &str = "name";
const FILE_MIME_TYPE: &str = "type";
const FILE_IN_APP: &str = "inApp";
const LATITUDE: &str = "lat";
const LONGITUDE: &str = "lon";
const ACCURACY: &str = "accuracy";
const ADDRESS: &str = "address";
const DESCRIPTION: &str = "description";
const VOIP_STATUS: &str = "status";
const VOIP_REASON: &str = "reason";
const EVENT_TYPE: &str = "type";
const EVENT_DATE: &str = "date";

/// How much of a message to serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DetailLevel {
    /// Only `id`, `type`, `sortKey`, `isOutbox` and `isStatus`.
    Minimal,
    /// Everything except the quote object.
    NoQuote,
    Full,
}

impl TryFrom<i32> for DetailLevel {
    type Error = ConversionError;

    fn try_from(level: i32) -> Result<Self> {
        match level {
            0 => Ok(DetailLevel::Minimal),
            1 => Ok(DetailLevel::NoQuote),
            2 => Ok(DetailLevel::Full),
            other => Err(ConversionError::unknown_value("detail level", other)),
        }
    }
}

/// Type a message is presented as.
///
/// File messages that ask for media rendering are presented as images,
/// voice messages or videos; stickers as images. Animated GIFs stay files.
pub fn virtual_type(message: &MessageModel) -> Result<MessageType> {
    if message.message_type != MessageType::File {
        return Ok(message.message_type);
    }
    let data = message.file_data()?;
    let mime_type = data.mime_type.as_str();
    let virtual_type = match data.rendering_type {
        RenderingType::Default => MessageType::File,
        RenderingType::Media => {
            if mime::is_supported_image(mime_type) && !mime::is_gif(mime_type) {
                MessageType::Image
            } else if mime::is_audio(mime_type) {
                MessageType::VoiceMessage
            } else if mime::is_video(mime_type) {
                MessageType::Video
            } else {
                MessageType::File
            }
        }
        RenderingType::Sticker if mime::is_supported_image(mime_type) => MessageType::Image,
        RenderingType::Sticker => MessageType::File,
    };
    Ok(virtual_type)
}

/// Appends an extension derived from `mime_type` to names that lack one.
///
/// ```
/// use webclient_converter::convert::message::fix_file_name;
///
/// assert_eq!(fix_file_name("report", Some("application/pdf")), "report.pdf");
/// assert_eq!(fix_file_name("photo", Some("image/jpeg")), "photo.jpg");
/// assert_eq!(fix_file_name("notes.txt", Some("application/pdf")), "notes.txt");
/// ```
pub fn fix_file_name(file_name: &str, mime_type: Option<&str>) -> String {
    let extension = match mime_type {
        Some(mime_type) if !file_name.contains('.') => mime::extension(mime_type),
        _ => None,
    };
    match extension {
        Some("jpeg") => format!("{file_name}.jpg"),
        Some(extension) => format!("{file_name}.{extension}"),
        None => file_name.to_owned(),
    }
}

/// `threema-<yyyyMMdd-HHmmss>-<apiMessageId>` for files stored without a name.
pub fn media_filename_prefix(message: &MessageModel) -> String {
    let millis = message.created_at.or(message.posted_at).unwrap_or_default();
    let timestamp = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .and_then(|date| {
            date.format(format_description!(
                "[year][month][day]-[hour][minute][second]"
            ))
            .ok()
        })
        .unwrap_or_else(|| "19700101-000000".to_owned());
    let suffix = message
        .api_message_id
        .clone()
        .unwrap_or_else(|| message.id.to_string());
    format!("threema-{timestamp}-{suffix}")
}

/// Body sent inline. Other types are requested on demand.
fn inline_body(message: &MessageModel) -> Option<&str> {
    match message.message_type {
        MessageType::Text | MessageType::Status | MessageType::Ballot => message.body.as_deref(),
        _ => None,
    }
}

fn seconds(millis: i64) -> i64 {
    millis / 1000
}

/// Display date: when the message was posted, or last modified for outgoing ones.
fn display_date(message: &MessageModel) -> Option<i64> {
    let date = match message.modified_at {
        Some(modified_at) if message.is_outbox => Some(modified_at),
        _ => message.posted_at,
    };
    date.map(seconds)
}

fn events(message: &MessageModel) -> MsgpackArrayBuilder {
    [
        ("created", message.created_at),
        ("sent", message.posted_at),
        ("modified", message.modified_at),
        ("edited", message.edited_at),
    ]
    .into_iter()
    .filter_map(|(event_type, date)| {
        date.map(|date| {
            MsgpackObjectBuilder::new()
                .put(EVENT_TYPE, event_type)
                .put(EVENT_DATE, seconds(date))
        })
    })
    .collect()
}

fn caption(message: &MessageModel) -> Option<&str> {
    match message.message_type {
        MessageType::Location => None,
        MessageType::File => message
            .caption
            .as_deref()
            .filter(|caption| !caption.is_empty())
            .or_else(|| message.file_data().ok()?.caption.as_deref()),
        _ => message.caption.as_deref(),
    }
}

fn status_type(message: &MessageModel) -> Option<&'static str> {
    if message.is_first_unread_marker {
        Some("firstUnreadMessage")
    } else if message.is_status_message {
        Some("text")
    } else {
        None
    }
}

fn video(data: VideoData) -> MsgpackObjectBuilder {
    MsgpackObjectBuilder::new()
        .put(DURATION, data.duration)
        .maybe_put(SIZE, (data.size != 0).then_some(data.size))
}

fn audio(data: AudioData) -> MsgpackObjectBuilder {
    MsgpackObjectBuilder::new().put(DURATION, data.duration)
}

fn file(message: &MessageModel, data: &FileData) -> MsgpackObjectBuilder {
    let file_name = data
        .file_name
        .clone()
        .unwrap_or_else(|| media_filename_prefix(message));
    MsgpackObjectBuilder::new()
        .put(FILE_NAME, fix_file_name(&file_name, Some(&data.mime_type)))
        .put(SIZE, data.file_size)
        .put(FILE_MIME_TYPE, data.mime_type.as_str())
        .put(FILE_IN_APP, data.rendering_type == RenderingType::Media)
}

fn location(data: &LocationData) -> MsgpackObjectBuilder {
    MsgpackObjectBuilder::new()
        .put(LATITUDE, data.latitude)
        .put(LONGITUDE, data.longitude)
        .put(ACCURACY, data.accuracy)
        .maybe_put(ADDRESS, data.address.as_deref())
        .put_nullable(DESCRIPTION, data.poi.as_deref())
}

fn voip_status(data: VoipStatusData) -> Result<MsgpackObjectBuilder> {
    let reason = data
        .reason
        .map(|code| RejectReason::try_from(code).map(RejectReason::code))
        .transpose()?;
    Ok(MsgpackObjectBuilder::new()
        .put(VOIP_STATUS, voip::status_code(data.status))
        .put_nullable(DURATION, data.duration)
        .put_nullable(VOIP_REASON, reason))
}

/// Media sub-object selected by the stored and the presented type.
fn put_media(
    builder: MsgpackObjectBuilder,
    message: &MessageModel,
    virtual_type: MessageType,
) -> Result<MsgpackObjectBuilder> {
    let builder = match message.message_type {
        MessageType::Video => builder.maybe_put(DATA_VIDEO, message.video_data().map(video)),
        MessageType::VoiceMessage => builder.maybe_put(DATA_AUDIO, message.audio_data().map(audio)),
        MessageType::File => {
            let data = message.file_data()?;
            match virtual_type {
                MessageType::Image => builder,
                MessageType::Video => builder.put(DATA_VIDEO, video(VideoData::from_file_data(data))),
                MessageType::VoiceMessage => builder.put(
                    DATA_AUDIO,
                    audio(AudioData {
                        duration: data.duration.unwrap_or(0),
                    }),
                ),
                _ => builder.put(DATA_FILE, file(message, data)),
            }
        }
        MessageType::Location => {
            builder.maybe_put(DATA_LOCATION, message.location_data().map(location))
        }
        MessageType::VoipStatus => builder.maybe_put(
            DATA_VOIP_STATUS,
            message.voip_status_data().map(voip_status).transpose()?,
        ),
        _ => builder,
    };
    Ok(builder)
}

/// Appends reactions and the delivery state for the configured generation.
fn put_reactions_and_state(
    ctx: &ConversionContext<'_>,
    builder: MsgpackObjectBuilder,
    message: &MessageModel,
) -> Result<MsgpackObjectBuilder> {
    let generation = ctx.config.reactions;
    let events = ctx.services.reactions.reactions(message)?;
    let mut state = message.state;

    let builder = match (&message.kind, generation) {
        (MessageKind::Group { member_states, .. }, ReactionGeneration::Legacy) => {
            let legacy = LegacyReactions::collect(member_states, &events);
            if legacy.is_empty() {
                builder
            } else {
                builder.put(REACTIONS, legacy.into_builder())
            }
        }
        (_, ReactionGeneration::Legacy) => {
            if let Some(reaction_state) = reactions::legacy_state(&events) {
                state = Some(reaction_state);
            }
            builder
        }
        (_, ReactionGeneration::Emoji) => {
            let buckets = reactions::emoji_reactions(reactions::aggregate(&events));
            if buckets.is_empty() {
                builder
            } else {
                builder.put(EMOJI_REACTIONS, buckets)
            }
        }
    };

    // Group acknowledgements are reactions, never a message state.
    if message.is_group_message() {
        if let Some(MessageState::UserAck | MessageState::UserDec) = state {
            state = Some(MessageState::Delivered);
        }
    }
    Ok(builder.maybe_put(STATE, state.map(|state| message_state::convert(state, generation))))
}

/// Minimal encoding shared by group, group call and forward security status messages.
fn convert_status(
    ctx: &ConversionContext<'_>,
    message: &MessageModel,
    partner_id: Option<String>,
) -> Result<MsgpackObjectBuilder> {
    let view = ctx.services.messages.view_element(message)?;
    let events = events(message);
    Ok(MsgpackObjectBuilder::new()
        .put(ID, message.id.to_string())
        .put(TYPE, message_type::convert(MessageType::Text)?)
        .put(SORT_KEY, message.id)
        .put(IS_OUTBOX, message.is_outbox)
        .put(IS_STATUS, true)
        .maybe_put(PARTNER_ID, partner_id)
        .maybe_put(BODY, view.text)
        .put(IS_UNREAD, false)
        .put(STATUS_TYPE, "text")
        .put(
            STATE,
            message_state::convert(MessageState::Delivered, ctx.config.reactions),
        )
        .maybe_put(DATE, display_date(message))
        .maybe_put(EVENTS, (!events.is_empty()).then_some(events)))
}

fn convert_group_call_status(
    ctx: &ConversionContext<'_>,
    message: &MessageModel,
) -> Result<MsgpackObjectBuilder> {
    let data = message.group_call_status_data()?;
    let partner_id = match data.status {
        GroupCallStatus::Started => data.caller_identity.clone(),
        GroupCallStatus::Ended => Some(ctx.services.user.identity()?),
    };
    convert_status(ctx, message, partner_id)
}

/// Converts one message.
///
/// `receiver` is the conversation the message belongs to; quotes are
/// resolved within it.
pub fn convert(
    ctx: &ConversionContext<'_>,
    message: &MessageModel,
    receiver: &Receiver,
    send_thumbnail: bool,
    detail: DetailLevel,
) -> Result<MsgpackObjectBuilder> {
    let virtual_type = virtual_type(message)?;

    match virtual_type {
        MessageType::GroupStatus => {
            message.group_status_data()?;
            return convert_status(ctx, message, message.identity.clone());
        }
        MessageType::GroupCallStatus if message.is_group_message() => {
            return convert_group_call_status(ctx, message);
        }
        MessageType::ForwardSecurityStatus => {
            message.forward_security_status_data()?;
            return convert_status(ctx, message, message.identity.clone());
        }
        _ => {}
    }

    let builder = MsgpackObjectBuilder::new()
        .put(ID, message.id.to_string())
        .put(TYPE, message_type::convert(virtual_type)?)
        .put(SORT_KEY, message.id)
        .put(IS_OUTBOX, message.is_outbox)
        .put(IS_STATUS, message.is_status_message);
    if detail == DetailLevel::Minimal {
        return Ok(builder);
    }

    // Quotes are extracted at every remaining level to strip version 1
    // quotes from the body.
    let builder = match quote::content(ctx, message, receiver)? {
        Some(content) => {
            let builder = builder.maybe_put(BODY, content.body.as_deref());
            if detail == DetailLevel::Full {
                builder.put(QUOTE, quote::convert(ctx, &content, receiver)?)
            } else {
                builder
            }
        }
        None => builder.maybe_put(BODY, inline_body(message)),
    };

    let builder = builder
        .maybe_put(PARTNER_ID, message.identity.as_deref())
        .put(IS_UNREAD, message.is_unread());
    let builder = put_reactions_and_state(ctx, builder, message)?;

    let events = events(message);
    let builder = builder
        .maybe_put(DATE, display_date(message))
        .maybe_put(LAST_EDITED_AT, message.edited_at.map(seconds))
        .maybe_put(EVENTS, (!events.is_empty()).then_some(events))
        .maybe_put(CAPTION, caption(message))
        .maybe_put(STATUS_TYPE, status_type(message));
    let builder = if send_thumbnail {
        builder.maybe_put(THUMBNAIL, thumbnail::convert(ctx, message))
    } else {
        builder
    };
    put_media(builder, message, virtual_type)
}

/// Converts a history page at full detail, newest first. The first failing
/// message fails the whole batch.
pub fn convert_all(
    ctx: &ConversionContext<'_>,
    messages: &[MessageModel],
    receiver: &Receiver,
    send_thumbnail: bool,
) -> Result<Vec<MsgpackBuilder>> {
    messages
        .iter()
        .rev()
        .map(|message| {
            convert(ctx, message, receiver, send_thumbnail, DetailLevel::Full)
                .map(MsgpackBuilder::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MessageData;

    fn file_message(mime_type: &str, rendering_type: RenderingType) -> MessageModel {
        MessageModel {
            id: 1,
            api_message_id: Some("0123456789abcdef".to_owned()),
            kind: MessageKind::Contact,
            message_type: MessageType::File,
            identity: Some("ECHOECHO".to_owned()),
            body: None,
            caption: None,
            quoted_message_id: None,
            is_outbox: false,
            is_read: true,
            is_status_message: false,
            is_first_unread_marker: false,
            state: None,
            created_at: Some(1_700_000_000_000),
            posted_at: None,
            modified_at: None,
            edited_at: None,
            data: Some(MessageData::File(FileData {
                mime_type: mime_type.to_owned(),
                file_name: None,
                file_size: 10,
                rendering_type,
                caption: None,
                duration: None,
            })),
        }
    }

    #[test]
    fn media_files_are_reclassified() {
        let cases = [
            ("image/png", RenderingType::Media, MessageType::Image),
            ("image/gif", RenderingType::Media, MessageType::File),
            ("audio/ogg", RenderingType::Media, MessageType::VoiceMessage),
            ("video/mp4", RenderingType::Media, MessageType::Video),
            ("image/svg+xml", RenderingType::Media, MessageType::File),
            ("audio/ogg", RenderingType::Sticker, MessageType::File),
            ("image/gif", RenderingType::Sticker, MessageType::Image),
            ("image/png", RenderingType::Default, MessageType::File),
        ];
        for (mime_type, rendering_type, expected) in cases {
            let message = file_message(mime_type, rendering_type);
            assert_eq!(
                virtual_type(&message),
                Ok(expected),
                "{mime_type} {rendering_type:?}"
            );
        }
    }

    #[test]
    fn file_without_data_is_missing_field() {
        let mut message = file_message("image/png", RenderingType::Media);
        message.data = None;
        let err = virtual_type(&message).unwrap_err();
        assert_eq!(err.message(), "required field `fileData` is missing");
    }

    #[test]
    fn filename_prefix_uses_creation_time() {
        let message = file_message("application/pdf", RenderingType::Default);
        assert_eq!(
            media_filename_prefix(&message),
            "threema-20231114-221320-0123456789abcdef"
        );
    }

    #[test]
    fn detail_levels_from_codes() {
        assert_eq!(DetailLevel::try_from(1), Ok(DetailLevel::NoQuote));
        assert!(DetailLevel::try_from(3).is_err());
    }

    #[test]
    fn outgoing_messages_date_by_modification() {
        let mut message = file_message("application/pdf", RenderingType::Default);
        message.posted_at = Some(10_000);
        message.modified_at = Some(20_000);
        assert_eq!(display_date(&message), Some(10));
        message.is_outbox = true;
        assert_eq!(display_date(&message), Some(20));
    }
}
