//! Bitmap resizing and encoding for avatars and thumbnails.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat};

use crate::model::Bitmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Scales `width`x`height` so the longer side is at most `max`, keeping the
/// aspect ratio. Sizes already within bounds are returned unchanged.
pub fn resize_proportionally(width: u32, height: u32, max: u32) -> Size {
    if width <= max && height <= max {
        return Size { width, height };
    }
    let scale = |side: u32, long: u32| -> u32 {
        let scaled = (u64::from(side) * u64::from(max) + u64::from(long) / 2) / u64::from(long);
        u32::try_from(scaled).unwrap_or(max).max(1)
    };
    if width >= height {
        Size {
            width: max,
            height: scale(height, width),
        }
    } else {
        Size {
            width: scale(width, height),
            height: max,
        }
    }
}

/// Downscales `bitmap` to fit within `max`x`max`. Smaller bitmaps are kept.
pub fn resize(bitmap: Bitmap, max: u32) -> Bitmap {
    let Size { width, height } = resize_proportionally(bitmap.width(), bitmap.height(), max);
    if width == bitmap.width() && height == bitmap.height() {
        return bitmap;
    }
    let image = bitmap.into_image();
    Bitmap::new(image.resize_exact(width, height, FilterType::Triangle))
}

/// Encodes `bitmap` as `format`. `quality` applies to lossy formats only.
pub fn encode(bitmap: &Bitmap, format: ImageFormat, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = bitmap.image().to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(&rgb)?;
        }
        _ => {
            let image: &DynamicImage = bitmap.image();
            image.write_to(&mut Cursor::new(&mut bytes), format)?;
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_bounds() {
        assert_eq!(
            resize_proportionally(700, 350, 350),
            Size {
                width: 350,
                height: 175
            }
        );
        assert_eq!(
            resize_proportionally(100, 1000, 350),
            Size {
                width: 35,
                height: 350
            }
        );
        assert_eq!(
            resize_proportionally(20, 10, 350),
            Size {
                width: 20,
                height: 10
            }
        );
        assert_eq!(resize_proportionally(5000, 1, 50).height, 1);
    }

    #[test]
    fn resize_keeps_small_bitmaps() {
        let bitmap = Bitmap::new(DynamicImage::new_rgb8(40, 30));
        let resized = resize(bitmap, 50);
        assert_eq!((resized.width(), resized.height()), (40, 30));

        let resized = resize(Bitmap::new(DynamicImage::new_rgb8(400, 300)), 50);
        assert_eq!((resized.width(), resized.height()), (50, 38));
    }

    #[test]
    fn encodes_jpeg_and_png() {
        let bitmap = Bitmap::new(DynamicImage::new_rgba8(8, 8));
        let jpeg = encode(&bitmap, ImageFormat::Jpeg, 60).unwrap();
        assert_eq!(&jpeg[..2], &[0xff, 0xd8]);
        let png = encode(&bitmap, ImageFormat::Png, 100).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
