use crate::CameraApp;

/// Shows the last captured still, with save and copy actions
pub fn capture_window(app: &mut CameraApp, ctx: &egui::Context) {
    let Some(capture) = app.last_capture() else {
        return;
    };
    let title = format!("Capture {}x{} {}", capture.width(), capture.height(), capture.format());
    let size = egui::vec2(capture.width() as f32, capture.height() as f32);
    let data_uri = capture.to_data_uri();

    let texture = app.capture_texture(ctx);
    let mut open = true;
    let mut save = false;

    egui::Window::new(title)
        .id(egui::Id::new("capture_window"))
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            match texture {
                Some(texture_id) => {
                    ui.add(egui::Image::new(egui::load::SizedTexture::new(texture_id, size)));
                }
                None => {
                    ui.label("Capture could not be displayed");
                }
            }
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save = true;
                }
                if ui.button("Copy data URI").clicked() {
                    ctx.copy_text(data_uri);
                }
            });
        });

    if save {
        app.save_capture();
    }
    if !open {
        app.dismiss_capture();
    }
}
