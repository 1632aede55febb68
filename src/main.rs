#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe_camera::{CameraApp, CameraConfig};

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // CAMERA_CONFIG: path to a JSON config. CAMERA_SOURCE: still image to use as the surface.
    let config = std::env::var_os("CAMERA_CONFIG").and_then(|path| match CameraConfig::load(&path) {
        Ok(config) => Some(config),
        Err(err) => {
            log::error!("Ignoring {}: {}", path.to_string_lossy(), err);
            None
        }
    });
    let source_path = std::env::var_os("CAMERA_SOURCE").map(std::path::PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 560.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "eframe camera",
        native_options,
        Box::new(|cc| Ok(Box::new(CameraApp::new(cc, config, source_path)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
