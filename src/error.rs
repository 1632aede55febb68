use thiserror::Error;

use crate::geometry::SelectionRect;

/// Errors reported synchronously by [`crate::CaptureSession::take`].
///
/// A failed capture never yields partial image bytes.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Unsupported image format: {0} (expected png or jpeg)")]
    UnsupportedFormat(String),

    #[error("{name}: {message}")]
    MediaUnavailable { name: String, message: String },

    #[error("Cannot capture while a selection gesture is in progress")]
    GestureInProgress,

    #[error("Selection {0} cannot be captured")]
    InvalidSelection(SelectionRect),

    #[error("Failed to encode image: {0}")]
    Encoding(#[from] image::ImageError),
}

impl CaptureError {
    /// Labeled media failure, e.g. `NotFoundError: no camera`.
    pub fn media(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MediaUnavailable {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while loading a [`crate::CameraConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid capture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
