use egui::{PointerButton, Pos2};
use log::{debug, info, warn};

use crate::capture::{CapturedImage, capture_frame};
use crate::config::CameraConfig;
use crate::error::CaptureError;
use crate::geometry::{LayoutNode, ScrollOffset, SelectionRect, resolve_offset, to_surface_local};
use crate::input::{InputEvent, PointerTarget};
use crate::media::FrameSource;
use crate::selection::{DragController, GestureMode, SelectionOverlay};

/// One camera surface and its crop selection.
///
/// Every pointer event goes through [`CaptureSession::handle_event`], which
/// consults the drag controller's state and drops events that do not apply.
/// The committed rectangle is written only when a gesture ends.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    config: CameraConfig,
    layout: LayoutNode,
    scroll: ScrollOffset,
    selection: SelectionRect,
    overlay: SelectionOverlay,
    controller: DragController,
}

impl CaptureSession {
    pub fn new(config: CameraConfig) -> Self {
        let mut overlay = SelectionOverlay::new(config.overlay);
        if config.need_edit {
            overlay.init();
        }
        Self {
            config,
            layout: LayoutNode::default(),
            scroll: ScrollOffset::default(),
            selection: SelectionRect::ZERO,
            overlay,
            controller: DragController::new(),
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Replaces the configuration. Turning editing off drops any selection.
    pub fn set_config(&mut self, config: CameraConfig) {
        let was_editing = self.config.need_edit;
        self.overlay.set_style(config.overlay);
        self.config = config;

        if self.config.need_edit && !was_editing {
            self.overlay.init();
        } else if !self.config.need_edit && was_editing {
            self.controller.cancel(SelectionRect::ZERO, &mut self.overlay);
            self.clear_selection();
        }
    }

    /// Sets the surface's containment chain, used to translate pointer positions.
    pub fn set_layout(&mut self, layout: LayoutNode) {
        self.layout = layout;
    }

    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    /// The committed crop rectangle, `ZERO` when there is none.
    pub fn selection(&self) -> SelectionRect {
        self.selection
    }

    pub fn overlay(&self) -> &SelectionOverlay {
        &self.overlay
    }

    pub fn gesture_mode(&self) -> GestureMode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Document position to surface-local position.
    pub fn surface_local(&self, client: Pos2) -> Pos2 {
        to_surface_local(client, resolve_offset(&self.layout), self.scroll)
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        if !self.config.need_edit {
            return;
        }

        match event {
            InputEvent::PointerDown { location, button } => {
                if *button != PointerButton::Primary || location.target != PointerTarget::Surface {
                    return;
                }
                let local = self.surface_local(location.position);
                if self.overlay.contains(local) {
                    self.controller.on_overlay_down(location.position, &mut self.overlay);
                } else {
                    self.controller.on_surface_down(local, &mut self.overlay);
                }
            }
            InputEvent::PointerMove { location, .. } => {
                let local = self.surface_local(location.position);
                self.controller
                    .on_pointer_move(local, location.position, &mut self.overlay);
            }
            InputEvent::PointerUp { button, .. } => {
                if *button != PointerButton::Primary {
                    return;
                }
                if let Some(rect) = self.controller.on_pointer_up(&mut self.overlay) {
                    self.selection = rect;
                    if rect.is_empty() {
                        info!("Selection cleared; captures use the full surface");
                    } else {
                        info!("Selection committed: {}", rect);
                    }
                }
            }
            InputEvent::Cancel => {
                self.controller.cancel(self.selection, &mut self.overlay);
            }
        }
    }

    /// Drops the committed selection and hides the overlay.
    pub fn clear_selection(&mut self) {
        if self.controller.is_active() {
            debug!("Not clearing selection during a gesture");
            return;
        }
        self.selection = SelectionRect::ZERO;
        self.overlay.hide();
    }

    /// Pulses the overlay to re-affirm the current selection.
    pub fn flash(&mut self) {
        if self.overlay.is_visible() {
            self.overlay.flash();
        }
    }

    /// Captures a still from `source` using the committed selection.
    ///
    /// The output format is checked before any pixels are read. Capturing
    /// while a gesture is active is refused rather than reading a rectangle
    /// that is still changing.
    pub fn take(&self, source: &dyn FrameSource) -> Result<CapturedImage, CaptureError> {
        if self.controller.is_active() {
            warn!("Capture refused: {} gesture in progress", self.controller.current_state_name());
            return Err(CaptureError::GestureInProgress);
        }

        let format = self.config.output_format().inspect_err(|err| warn!("{}", err))?;
        let selection = if self.config.need_edit {
            self.selection
        } else {
            SelectionRect::ZERO
        };

        let image = capture_frame(source, selection, (self.config.width, self.config.height), format)?;
        info!(
            "Captured {}x{} {} ({} bytes)",
            image.width(),
            image.height(),
            image.format(),
            image.bytes().len()
        );
        Ok(image)
    }
}
