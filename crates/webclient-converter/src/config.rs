//! Converter configuration.
//!
//! Loaded from TOML by the host; every field has a default so an empty
//! document yields the current protocol generation.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid converter configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid converter configuration: {0}")]
    Invalid(String),
}

/// Which reaction representation the remote client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionGeneration {
    /// Bucketed `emojiReactions`.
    #[default]
    Emoji,
    /// Ack/dec only, folded into `reactions` or `state`.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Bound for the announced thumbnail dimensions.
    pub max_px: u32,
    /// Bound for the embedded preview image.
    pub preview_max_px: u32,
    /// JPEG quality of the preview, 1..=100.
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_px: 350,
            preview_max_px: 50,
            quality: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Bound for low resolution avatars. High resolution avatars are sent
    /// as provided unless the caller asks for a bound.
    pub lores_max_px: u32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            lores_max_px: 48,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub reactions: ReactionGeneration,
    /// Set for work builds; enables `isWork` fields.
    pub work_build: bool,
    pub thumbnail: ThumbnailConfig,
    pub avatar: AvatarConfig,
}

impl ConverterConfig {
    /// Parses and validates a TOML document.
    ///
    /// ```
    /// use webclient_converter::config::{ConverterConfig, ReactionGeneration};
    ///
    /// let config = ConverterConfig::from_toml_str("reactions = \"legacy\"").unwrap();
    /// assert_eq!(config.reactions, ReactionGeneration::Legacy);
    /// assert_eq!(config.thumbnail.max_px, 350);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ConverterConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.thumbnail.quality) {
            return Err(ConfigError::Invalid(format!(
                "thumbnail.quality must be within 1..=100, got {}",
                self.thumbnail.quality
            )));
        }
        let bounds = [
            ("thumbnail.max_px", self.thumbnail.max_px),
            ("thumbnail.preview_max_px", self.thumbnail.preview_max_px),
            ("avatar.lores_max_px", self.avatar.lores_max_px),
        ];
        for (name, value) in bounds {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must not be 0")));
            }
        }
        Ok(())
    }
}
