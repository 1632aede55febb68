use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in surface-local pixels.
///
/// A rectangle with zero width or zero height is the "no selection" sentinel:
/// capture then uses the whole surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SelectionRect {
    /// The sentinel empty rectangle `{0,0,0,0}`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, w: 0.0, h: 0.0 };

    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds the rectangle swept between a drag anchor and the current pointer.
    ///
    /// Both points must be in the same coordinate space. The result always has
    /// non-negative `w`/`h` and its origin at the top-left of the swept area,
    /// whichever quadrant the pointer moved into.
    pub fn from_drag(start: Pos2, current: Pos2) -> Self {
        let w_raw = current.x - start.x;
        let h_raw = current.y - start.y;

        let (x, w) = if w_raw < 0.0 { (start.x + w_raw, -w_raw) } else { (start.x, w_raw) };
        let (y, h) = if h_raw < 0.0 { (start.y + h_raw, -h_raw) } else { (start.y, h_raw) };

        Self { x, y, w, h }
    }

    /// True for the "use full surface" sentinel.
    pub fn is_empty(&self) -> bool {
        self.w == 0.0 || self.h == 0.0
    }

    pub fn min(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Returns the rectangle shifted by `delta`; size is unchanged.
    pub fn translate(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        pos.x >= self.x && pos.x <= self.x + self.w && pos.y >= self.y && pos.y <= self.y + self.h
    }

    /// Places this surface-local rectangle on screen given the surface origin.
    pub fn to_screen(&self, surface_origin: Pos2) -> Rect {
        Rect::from_min_size(surface_origin + self.min().to_vec2(), self.size())
    }
}

impl From<Rect> for SelectionRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }
}

impl From<SelectionRect> for Rect {
    fn from(rect: SelectionRect) -> Self {
        Rect::from_min_size(rect.min(), rect.size())
    }
}

impl std::fmt::Display for SelectionRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{x: {}, y: {}, w: {}, h: {}}}", self.x, self.y, self.w, self.h)
    }
}
