use crate::CameraApp;
use crate::capture::OutputFormat;
use crate::selection::GestureMode;

pub fn controls_panel(app: &mut CameraApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            app.set_controls_rect(ui.max_rect());

            ui.heading("Camera");
            ui.separator();

            let mut config = app.config().clone();

            // An unrecognized imageType stays selected as-is so capture can report it.
            egui::ComboBox::from_label("Format")
                .selected_text(config.image_type.clone())
                .show_ui(ui, |ui| {
                    for format in OutputFormat::ALL {
                        ui.selectable_value(&mut config.image_type, format.name().to_owned(), format.name());
                    }
                });

            ui.checkbox(&mut config.need_edit, "Crop selection");

            egui::Grid::new("surface_size_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Width");
                    ui.add(egui::DragValue::new(&mut config.width).range(1..=4096));
                    ui.end_row();
                    ui.label("Height");
                    ui.add(egui::DragValue::new(&mut config.height).range(1..=4096));
                    ui.end_row();
                });

            if config != *app.config() {
                app.set_config(config);
            }

            ui.separator();

            let session = app.session();
            let idle = session.gesture_mode() == GestureMode::None;
            let selection = session.selection();
            let has_selection = !selection.is_empty();

            ui.horizontal(|ui| {
                ui.label(format!("(State: {})", session.controller().current_state_name()));
            });
            if has_selection {
                ui.label(format!(
                    "Selection: {:.0}x{:.0} at ({:.0}, {:.0})",
                    selection.w, selection.h, selection.x, selection.y
                ));
            } else {
                ui.label("Selection: full surface");
            }
            let (source_w, source_h) = app.source_size();
            ui.label(format!("Source: {source_w}x{source_h}"));

            ui.horizontal(|ui| {
                if ui.add_enabled(has_selection && idle, egui::Button::new("Flash")).clicked() {
                    app.flash_selection();
                }
                if ui.add_enabled(has_selection && idle, egui::Button::new("Clear")).clicked() {
                    app.clear_selection();
                }
            });

            ui.separator();

            if ui.add_enabled(idle, egui::Button::new("📷 Take")).clicked() {
                app.take();
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(230, 120, 60), status);
            }
        });
}
