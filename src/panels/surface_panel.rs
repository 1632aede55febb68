use crate::CameraApp;
use crate::geometry::{LayoutNode, ScrollOffset};
use crate::selection::{GestureMode, SelectionOverlay};

pub fn surface_panel(app: &mut CameraApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Input is routed with the layout recorded on the previous frame.
        app.handle_input(ctx);

        let surface_size = app.config().surface_size();
        let texture = app.surface_texture(ctx);

        let output = egui::ScrollArea::both().show(ui, |ui| {
            let (surface_rect, response) =
                ui.allocate_exact_size(surface_size, egui::Sense::click_and_drag());

            let painter = ui.painter_at(surface_rect);
            app.paint_surface(&painter, surface_rect, texture);

            let session = app.session();
            if session.gesture_mode() == GestureMode::Moving {
                ctx.set_cursor_icon(SelectionOverlay::CURSOR);
            } else if let Some(hover) = response.hover_pos() {
                let local = (hover - surface_rect.min).to_pos2();
                if session.overlay().contains(local) {
                    ctx.set_cursor_icon(SelectionOverlay::CURSOR);
                } else if session.config().need_edit {
                    ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
                }
            }

            surface_rect
        });

        // Document space: the scroll viewport's origin, then the surface's
        // position inside the scrolled content.
        let viewport = output.inner_rect;
        let scroll = output.state.offset;
        let surface_rect = output.inner;
        let layout = LayoutNode::root(viewport.min.to_vec2())
            .child(surface_rect.min - viewport.min + scroll);
        app.set_surface_layout(layout, ScrollOffset::new(scroll.x, scroll.y));

        // Only the part of the surface left visible by the scroll area takes presses.
        app.set_surface_hit_area(surface_rect.intersect(viewport), ui.layer_id());
    });
}
