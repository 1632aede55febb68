use egui::{Color32, CursorIcon, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::SelectionRect;

/// Colors used to paint the selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayStyle {
    pub border_color: Color32,
    pub fill_color: Color32,
    pub border_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            border_color: Color32::BLACK,
            fill_color: Color32::from_rgba_unmultiplied(255, 255, 255, 178),
            border_width: 1.0,
        }
    }
}

/// The on-screen rectangle echoing the current selection.
///
/// The overlay does not validate what it is given: callers hand it
/// normalized rectangles. Besides being driven by the drag controller it can
/// be dragged itself; that move gesture tracks the pointer incrementally,
/// adding the delta since the previous move to the stored origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOverlay {
    rect: SelectionRect,
    visible: bool,
    movable: bool,
    move_anchor: Option<Pos2>,
    style: OverlayStyle,
}

impl Default for SelectionOverlay {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

impl SelectionOverlay {
    /// Cursor shown while hovering the overlay.
    pub const CURSOR: CursorIcon = CursorIcon::Move;

    pub fn new(style: OverlayStyle) -> Self {
        Self {
            rect: SelectionRect::ZERO,
            visible: false,
            movable: false,
            move_anchor: None,
            style,
        }
    }

    /// Places the overlay at `(0,0,0,0)`, hidden, and enables its move gesture.
    pub fn init(&mut self) {
        self.rect = SelectionRect::ZERO;
        self.move_anchor = None;
        self.movable = true;
        self.hide();
    }

    /// Stores `rect` as the current geometry and makes the overlay visible.
    pub fn refresh(&mut self, rect: SelectionRect) {
        self.rect = rect;
        self.show();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Visual pulse: hide, then show again. Geometry is untouched.
    pub fn flash(&mut self) {
        self.hide();
        self.show();
    }

    pub fn rect(&self) -> SelectionRect {
        self.rect
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    /// Hit test in surface-local coordinates. Hidden or empty overlays are never hit.
    pub fn contains(&self, local: Pos2) -> bool {
        self.visible && !self.rect.is_empty() && self.rect.contains(local)
    }

    pub fn is_moving(&self) -> bool {
        self.move_anchor.is_some()
    }

    /// Starts dragging the overlay from the pointer's document position.
    ///
    /// Returns false when the overlay has not been initialized or is hidden.
    pub fn begin_move(&mut self, pointer: Pos2) -> bool {
        if !self.movable || !self.visible {
            return false;
        }
        self.move_anchor = Some(pointer);
        true
    }

    /// Applies the delta since the previous pointer position and re-anchors.
    pub fn drag_to(&mut self, pointer: Pos2) -> Option<Vec2> {
        let anchor = self.move_anchor?;
        let delta = pointer - anchor;
        self.refresh(self.rect.translate(delta));
        self.move_anchor = Some(pointer);
        Some(delta)
    }

    /// Ends the move gesture, returning the final geometry if one was running.
    pub fn end_move(&mut self) -> Option<SelectionRect> {
        self.move_anchor.take().map(|_| self.rect)
    }
}
