use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capture::OutputFormat;
use crate::error::{CaptureError, ConfigError};
use crate::selection::OverlayStyle;

/// Options recognized by a camera session.
///
/// JSON keys follow the external option names (`imageType`, `needEdit`,
/// `width`, `height`); every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    /// Output encoding, `png` or `jpeg` (case-insensitive).
    pub image_type: String,
    /// Enables the crop-selection gesture.
    pub need_edit: bool,
    /// Declared surface width; full captures are this wide.
    pub width: u32,
    /// Declared surface height; full captures are this tall.
    pub height: u32,
    pub overlay: OverlayStyle,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            image_type: "png".to_owned(),
            need_edit: false,
            width: 600,
            height: 400,
            overlay: OverlayStyle::default(),
        }
    }
}

impl CameraConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Parses `image_type`; unsupported names are a caller error.
    pub fn output_format(&self) -> Result<OutputFormat, CaptureError> {
        self.image_type.parse()
    }

    /// Declared surface size in surface-local units.
    pub fn surface_size(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}
