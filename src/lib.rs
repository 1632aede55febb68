#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod capture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod media;
pub mod panels;
pub mod renderer;
pub mod selection;
pub mod session;
pub mod texture_manager;

pub use app::CameraApp;
pub use capture::{CapturedImage, OutputFormat};
pub use config::CameraConfig;
pub use error::{CaptureError, ConfigError};
pub use geometry::SelectionRect;
pub use input::{InputEvent, InputLocation, PointerTarget};
pub use media::FrameSource;
pub use renderer::Renderer;
pub use selection::{DragController, GestureMode, SelectionOverlay};
pub use session::CaptureSession;
