mod controller;
mod overlay;

pub use controller::{DragController, GestureMode, GestureState};
pub use overlay::{OverlayStyle, SelectionOverlay};
