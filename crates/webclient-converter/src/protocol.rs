//! Fixed protocol parameters announced to the remote client.

use image::ImageFormat;

/// Format of message thumbnail previews.
pub const FORMAT_THUMBNAIL: ImageFormat = ImageFormat::Jpeg;
/// Format of avatars.
pub const FORMAT_AVATAR: ImageFormat = ImageFormat::Png;

pub const MAX_GROUP_SIZE: i32 = 256;
/// Bytes.
pub const MAX_FILE_SIZE: i64 = 100 * 1024 * 1024;
