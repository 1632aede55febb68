use egui::Pos2;
use log::debug;

use super::overlay::SelectionOverlay;
use crate::geometry::SelectionRect;

/// Which gesture, if any, currently owns the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    None,
    Creating,
    Moving,
}

/// Transient state for one pointer-down to pointer-up cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Sweeping out a new rectangle from a fixed surface-local anchor.
    Creating {
        anchor: Pos2,
        has_moved: bool,
        candidate: SelectionRect,
    },
    /// Repositioning the existing overlay; the incremental anchor lives on the overlay.
    Moving,
}

impl GestureState {
    pub fn mode(&self) -> GestureMode {
        match self {
            Self::Idle => GestureMode::None,
            Self::Creating { .. } => GestureMode::Creating,
            Self::Moving => GestureMode::Moving,
        }
    }
}

/// Turns pointer events into selection rectangles.
///
/// Creating and Moving are entered only from Idle, so the two producers of
/// the committed rectangle can never run at the same time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: GestureState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn mode(&self) -> GestureMode {
        self.state.mode()
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    pub fn current_state_name(&self) -> &'static str {
        match self.state {
            GestureState::Idle => "Idle",
            GestureState::Creating { .. } => "Creating",
            GestureState::Moving => "Moving",
        }
    }

    /// Pointer pressed on the bare surface at surface-local `local`.
    pub fn on_surface_down(&mut self, local: Pos2, overlay: &mut SelectionOverlay) {
        if self.is_active() {
            debug!("Ignoring surface press while {}", self.current_state_name());
            return;
        }
        overlay.hide();
        self.state = GestureState::Creating {
            anchor: local,
            has_moved: false,
            candidate: SelectionRect::new(local.x, local.y, 0.0, 0.0),
        };
        debug!("Creating selection from anchor {:?}", local);
    }

    /// Pointer pressed on the overlay at document position `client`.
    pub fn on_overlay_down(&mut self, client: Pos2, overlay: &mut SelectionOverlay) {
        if self.is_active() {
            debug!("Ignoring overlay press while {}", self.current_state_name());
            return;
        }
        if overlay.begin_move(client) {
            self.state = GestureState::Moving;
            debug!("Moving selection {} from {:?}", overlay.rect(), client);
        }
    }

    /// Pointer moved. `local` feeds the create sweep, `client` the move deltas.
    pub fn on_pointer_move(&mut self, local: Pos2, client: Pos2, overlay: &mut SelectionOverlay) {
        match &mut self.state {
            GestureState::Idle => {}
            GestureState::Creating {
                anchor,
                has_moved,
                candidate,
            } => {
                *has_moved = true;
                *candidate = SelectionRect::from_drag(*anchor, local);
                overlay.refresh(*candidate);
            }
            GestureState::Moving => {
                overlay.drag_to(client);
            }
        }
    }

    /// Pointer released anywhere. Returns the rectangle to commit, if a gesture ended.
    ///
    /// A create gesture that never moved, or that swept no area, commits the
    /// empty sentinel and leaves the overlay hidden.
    pub fn on_pointer_up(&mut self, overlay: &mut SelectionOverlay) -> Option<SelectionRect> {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => None,
            GestureState::Creating {
                has_moved,
                candidate,
                ..
            } => {
                if has_moved && !candidate.is_empty() {
                    Some(candidate)
                } else {
                    overlay.hide();
                    Some(SelectionRect::ZERO)
                }
            }
            GestureState::Moving => Some(overlay.end_move().unwrap_or_else(|| overlay.rect())),
        }
    }

    /// Abandons the active gesture and restores the overlay to `committed`.
    pub fn cancel(&mut self, committed: SelectionRect, overlay: &mut SelectionOverlay) -> bool {
        if !self.is_active() {
            return false;
        }
        debug!("Cancelling {} gesture", self.current_state_name());
        self.state = GestureState::Idle;
        overlay.end_move();
        if committed.is_empty() {
            overlay.hide();
        } else {
            overlay.refresh(committed);
        }
        true
    }
}
