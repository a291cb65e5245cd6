//! Message thumbnails.
//!
//! Thumbnails are best effort: a missing or broken bitmap drops the field
//! and the message is still converted.

use tracing::warn;

use crate::builder::MsgpackObjectBuilder;
use crate::imaging;
use crate::model::{MessageModel, MessageType};
use crate::protocol;
use crate::services::ConversionContext;

const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const PREVIEW: &str = "preview";

pub fn can_have_thumbnail(message: &MessageModel) -> bool {
    matches!(
        message.message_type,
        MessageType::Image | MessageType::Video | MessageType::File
    )
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// `{width, height, preview}`: the bounded display size and a small JPEG preview.
pub fn convert(ctx: &ConversionContext<'_>, message: &MessageModel) -> Option<MsgpackObjectBuilder> {
    if !can_have_thumbnail(message) {
        return None;
    }
    let bitmap = match ctx.services.files.message_thumbnail(message) {
        Ok(Some(bitmap)) => bitmap,
        Ok(None) => return None,
        Err(err) => {
            warn!(message_id = message.id, error = %err, "could not load thumbnail");
            return None;
        }
    };

    let config = &ctx.config.thumbnail;
    let size = imaging::resize_proportionally(bitmap.width(), bitmap.height(), config.max_px);
    let preview = imaging::resize(bitmap, config.preview_max_px);
    match imaging::encode(&preview, protocol::FORMAT_THUMBNAIL, config.quality) {
        Ok(bytes) => Some(
            MsgpackObjectBuilder::new()
                .put(WIDTH, to_i32(size.width))
                .put(HEIGHT, to_i32(size.height))
                .put(PREVIEW, bytes),
        ),
        Err(err) => {
            warn!(message_id = message.id, error = %err, "could not encode thumbnail");
            None
        }
    }
}
