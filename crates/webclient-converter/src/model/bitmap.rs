use image::DynamicImage;

/// A decoded image owned by exactly one conversion call.
///
/// Dropping the value releases the pixel memory, so a bitmap obtained during
/// a conversion is released on every return path, including `?` exits.
#[derive(Debug, Clone)]
pub struct Bitmap(DynamicImage);

impl Bitmap {
    pub fn new(image: DynamicImage) -> Self {
        Self(image)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.0
    }

    pub fn into_image(self) -> DynamicImage {
        self.0
    }
}

impl From<DynamicImage> for Bitmap {
    fn from(image: DynamicImage) -> Self {
        Self(image)
    }
}
