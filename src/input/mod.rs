use egui::{Context, Event, Key, LayerId, PointerButton, Pos2, Rect};

/// Which part of the window an input event occurred over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The live video surface (and any overlay drawn on it)
    Surface,
    /// The controls side panel
    Controls,
    /// Anywhere else, including outside the window
    Outside,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in document (screen) coordinates
    pub position: Pos2,
    /// The region under the pointer
    pub target: PointerTarget,
}

impl InputLocation {
    pub fn new(position: Pos2, target: PointerTarget) -> Self {
        Self { position, target }
    }
}

/// Pointer events consumed by a capture session
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed, at the position where it went down
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove { location: InputLocation },
    /// Mouse button was released, wherever the pointer is
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Escape was pressed
    Cancel,
}

/// Raw pointer activity gathered from one frame, before hit-testing
enum RawPointer {
    Down(Pos2, PointerButton),
    Move(Pos2),
    Up(Pos2, PointerButton),
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    surface_rect: Option<Rect>,
    surface_layer: Option<LayerId>,
    controls_rect: Option<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the visible on-screen rectangle of the video surface and the
    /// layer it is painted on
    pub fn set_surface_rect(&mut self, rect: Rect, layer: LayerId) {
        self.surface_rect = Some(rect);
        self.surface_layer = Some(layer);
    }

    /// Update the controls panel rectangle
    pub fn set_controls_rect(&mut self, rect: Rect) {
        self.controls_rect = Some(rect);
    }

    fn determine_target(&self, ctx: &Context, pos: Pos2) -> PointerTarget {
        if self.controls_rect.is_some_and(|rect| rect.contains(pos)) {
            return PointerTarget::Controls;
        }
        if !self.surface_rect.is_some_and(|rect| rect.contains(pos)) {
            return PointerTarget::Outside;
        }
        // A window floating above the surface owns the pointer.
        match (ctx.layer_id_at(pos), self.surface_layer) {
            (Some(top), Some(surface)) if top != surface => PointerTarget::Outside,
            _ => PointerTarget::Surface,
        }
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// Presses come before moves and releases after them, so a click that
    /// starts and ends within one frame still reads as down-then-up. Presses
    /// and releases keep the position carried by their own event.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut raw = Vec::new();
        let mut cancel = false;

        ctx.input(|input| {
            let mut releases = Vec::new();
            for event in &input.events {
                if let Event::PointerButton { pos, button, pressed, .. } = event {
                    if *pressed {
                        raw.push(RawPointer::Down(*pos, *button));
                    } else {
                        releases.push(RawPointer::Up(*pos, *button));
                    }
                }
            }

            if let Some(pos) = input.pointer.latest_pos() {
                if Some(pos) != self.last_pointer_pos {
                    raw.push(RawPointer::Move(pos));
                }
                self.last_pointer_pos = Some(pos);
            }

            // Releases are reported even when the pointer has left the window.
            raw.extend(releases);
            cancel = input.key_pressed(Key::Escape);
        });

        let mut events: Vec<InputEvent> = raw
            .into_iter()
            .map(|pointer| match pointer {
                RawPointer::Down(pos, button) => InputEvent::PointerDown {
                    location: InputLocation::new(pos, self.determine_target(ctx, pos)),
                    button,
                },
                RawPointer::Move(pos) => InputEvent::PointerMove {
                    location: InputLocation::new(pos, self.determine_target(ctx, pos)),
                },
                RawPointer::Up(pos, button) => InputEvent::PointerUp {
                    location: InputLocation::new(pos, self.determine_target(ctx, pos)),
                    button,
                },
            })
            .collect();

        if cancel {
            events.push(InputEvent::Cancel);
        }
        events
    }
}
