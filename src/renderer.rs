use egui::{Align2, Color32, FontId, Painter, Rect, Stroke, TextureId, pos2};

use crate::selection::SelectionOverlay;

const NO_SIGNAL_COLOR: Color32 = Color32::from_gray(24);

/// Paints the video surface and the selection overlay on top of it
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draws the current frame stretched to `surface_rect`, or a placeholder
    pub fn render_surface(&self, painter: &Painter, surface_rect: Rect, texture: Option<TextureId>) {
        match texture {
            Some(texture_id) => {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture_id, surface_rect, uv, Color32::WHITE);
            }
            None => {
                painter.rect_filled(surface_rect, 0.0, NO_SIGNAL_COLOR);
                painter.text(
                    surface_rect.center(),
                    Align2::CENTER_CENTER,
                    "No signal",
                    FontId::proportional(18.0),
                    Color32::LIGHT_GRAY,
                );
            }
        }
    }

    /// Draws the overlay rectangle if it is visible.
    ///
    /// Overlay geometry is surface-local, so it is offset by the surface origin.
    pub fn render_overlay(&self, painter: &Painter, surface_rect: Rect, overlay: &SelectionOverlay) {
        if !overlay.is_visible() {
            return;
        }
        let style = overlay.style();
        let rect = overlay.rect().to_screen(surface_rect.min);
        painter.rect_filled(rect, 0.0, style.fill_color);
        painter.rect_stroke(rect, 0.0, Stroke::new(style.border_width, style.border_color));
    }
}
