mod capture_window;
mod controls_panel;
mod surface_panel;

pub use capture_window::capture_window;
pub use controls_panel::controls_panel;
pub use surface_panel::surface_panel;
