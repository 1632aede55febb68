use eframe_camera::geometry::{LayoutNode, ScrollOffset, SelectionRect};
use eframe_camera::input::{InputEvent, InputLocation, PointerTarget};
use eframe_camera::media::TestPatternSource;
use eframe_camera::selection::GestureMode;
use eframe_camera::{CameraConfig, CaptureError, CaptureSession};
use egui::{PointerButton, Pos2, Vec2};

// The surface sits at (100, 50) in document space.
const SURFACE_ORIGIN: Vec2 = Vec2::new(100.0, 50.0);

fn create_test_session() -> CaptureSession {
    let config = CameraConfig {
        need_edit: true,
        ..Default::default()
    };
    let mut session = CaptureSession::new(config);
    session.set_layout(LayoutNode::root(SURFACE_ORIGIN));
    session
}

fn doc(local_x: f32, local_y: f32) -> Pos2 {
    Pos2::new(local_x, local_y) + SURFACE_ORIGIN
}

fn down(pos: Pos2) -> InputEvent {
    InputEvent::PointerDown {
        location: InputLocation::new(pos, PointerTarget::Surface),
        button: PointerButton::Primary,
    }
}

fn move_to(pos: Pos2) -> InputEvent {
    InputEvent::PointerMove {
        location: InputLocation::new(pos, PointerTarget::Surface),
    }
}

fn up_at(pos: Pos2, target: PointerTarget) -> InputEvent {
    InputEvent::PointerUp {
        location: InputLocation::new(pos, target),
        button: PointerButton::Primary,
    }
}

fn up(pos: Pos2) -> InputEvent {
    up_at(pos, PointerTarget::Surface)
}

fn drag(session: &mut CaptureSession, from: Pos2, to: Pos2) {
    session.handle_events(&[down(from), move_to(to), up(to)]);
}

#[test]
fn test_create_gesture_commits_normalized_rect() {
    let mut session = create_test_session();

    session.handle_event(&down(doc(50.0, 50.0)));
    assert_eq!(session.gesture_mode(), GestureMode::Creating);
    assert!(!session.overlay().is_visible());

    session.handle_event(&move_to(doc(20.0, 10.0)));
    // Live preview only; nothing committed yet.
    assert!(session.overlay().is_visible());
    assert_eq!(session.overlay().rect(), SelectionRect::new(20.0, 10.0, 30.0, 40.0));
    assert_eq!(session.selection(), SelectionRect::ZERO);

    session.handle_event(&up(doc(20.0, 10.0)));
    assert_eq!(session.gesture_mode(), GestureMode::None);
    assert_eq!(session.selection(), SelectionRect::new(20.0, 10.0, 30.0, 40.0));
}

#[test]
fn test_click_without_movement_commits_empty_rect() {
    let mut session = create_test_session();

    session.handle_events(&[down(doc(10.0, 10.0)), up(doc(10.0, 10.0))]);

    assert_eq!(session.selection(), SelectionRect::ZERO);
    assert!(!session.overlay().is_visible());
}

#[test]
fn test_click_clears_previous_selection() {
    let mut session = create_test_session();
    drag(&mut session, doc(10.0, 10.0), doc(60.0, 60.0));
    assert!(!session.selection().is_empty());

    // A click outside the existing overlay starts (and ends) a fresh create gesture.
    session.handle_events(&[down(doc(300.0, 300.0)), up(doc(300.0, 300.0))]);

    assert_eq!(session.selection(), SelectionRect::ZERO);
    assert!(!session.overlay().is_visible());
}

#[test]
fn test_drag_back_to_anchor_is_not_left_visible() {
    let mut session = create_test_session();

    session.handle_events(&[
        down(doc(10.0, 10.0)),
        move_to(doc(40.0, 40.0)),
        move_to(doc(10.0, 10.0)),
        up(doc(10.0, 10.0)),
    ]);

    assert_eq!(session.selection(), SelectionRect::ZERO);
    assert!(!session.overlay().is_visible());
}

#[test]
fn test_release_outside_surface_still_commits() {
    let mut session = create_test_session();

    session.handle_events(&[
        down(doc(10.0, 10.0)),
        move_to(doc(700.0, 500.0)),
        up_at(Pos2::new(2000.0, 2000.0), PointerTarget::Outside),
    ]);

    assert_eq!(session.gesture_mode(), GestureMode::None);
    assert_eq!(session.selection(), SelectionRect::new(10.0, 10.0, 690.0, 490.0));
}

#[test]
fn test_move_gesture_writes_back_committed_rect() {
    let mut session = create_test_session();
    drag(&mut session, doc(20.0, 10.0), doc(50.0, 50.0));
    assert_eq!(session.selection(), SelectionRect::new(20.0, 10.0, 30.0, 40.0));

    // Press inside the overlay: this repositions instead of creating.
    session.handle_event(&down(doc(30.0, 20.0)));
    assert_eq!(session.gesture_mode(), GestureMode::Moving);
    assert!(session.overlay().is_visible());

    session.handle_events(&[
        move_to(doc(35.0, 22.0)),
        move_to(doc(40.0, 30.0)),
        move_to(doc(38.0, 29.0)),
    ]);
    assert_eq!(session.overlay().rect(), SelectionRect::new(28.0, 19.0, 30.0, 40.0));
    assert_eq!(session.selection(), SelectionRect::new(20.0, 10.0, 30.0, 40.0));

    session.handle_event(&up(doc(38.0, 29.0)));
    assert_eq!(session.gesture_mode(), GestureMode::None);
    assert_eq!(session.selection(), SelectionRect::new(28.0, 19.0, 30.0, 40.0));
}

#[test]
fn test_incremental_moves_match_single_translation() {
    let steps = [Vec2::new(3.0, -1.0), Vec2::new(-7.5, 4.0), Vec2::new(12.0, 0.5), Vec2::new(0.0, -9.0)];

    let mut stepwise = create_test_session();
    drag(&mut stepwise, doc(100.0, 100.0), doc(200.0, 180.0));
    let original = stepwise.selection();

    let mut pointer = doc(150.0, 150.0);
    stepwise.handle_event(&down(pointer));
    for step in steps {
        pointer += step;
        stepwise.handle_event(&move_to(pointer));
    }
    stepwise.handle_event(&up(pointer));

    let total = steps.iter().fold(Vec2::ZERO, |acc, step| acc + *step);
    assert_eq!(stepwise.selection(), original.translate(total));

    let mut reversed = create_test_session();
    drag(&mut reversed, doc(100.0, 100.0), doc(200.0, 180.0));
    let mut pointer = doc(150.0, 150.0);
    reversed.handle_event(&down(pointer));
    for step in steps.iter().rev() {
        pointer += *step;
        reversed.handle_event(&move_to(pointer));
    }
    reversed.handle_event(&up(pointer));

    assert_eq!(reversed.selection(), stepwise.selection());
}

#[test]
fn test_second_press_during_create_is_ignored() {
    let mut session = create_test_session();
    drag(&mut session, doc(0.0, 0.0), doc(100.0, 100.0));

    session.handle_event(&down(doc(200.0, 200.0)));
    session.handle_event(&move_to(doc(250.0, 260.0)));
    // A stray press landing on the preview must not switch to moving.
    session.handle_event(&down(doc(220.0, 220.0)));
    assert_eq!(session.gesture_mode(), GestureMode::Creating);

    session.handle_event(&up(doc(250.0, 260.0)));
    assert_eq!(session.selection(), SelectionRect::new(200.0, 200.0, 50.0, 60.0));
}

#[test]
fn test_secondary_button_is_ignored() {
    let mut session = create_test_session();

    session.handle_event(&InputEvent::PointerDown {
        location: InputLocation::new(doc(10.0, 10.0), PointerTarget::Surface),
        button: PointerButton::Secondary,
    });

    assert_eq!(session.gesture_mode(), GestureMode::None);
}

#[test]
fn test_press_outside_surface_does_not_start_gesture() {
    let mut session = create_test_session();

    session.handle_event(&InputEvent::PointerDown {
        location: InputLocation::new(Pos2::new(5.0, 5.0), PointerTarget::Controls),
        button: PointerButton::Primary,
    });

    assert_eq!(session.gesture_mode(), GestureMode::None);
}

#[test]
fn test_cancel_restores_committed_selection() {
    let mut session = create_test_session();
    drag(&mut session, doc(10.0, 10.0), doc(60.0, 60.0));
    let committed = session.selection();

    session.handle_events(&[down(doc(200.0, 200.0)), move_to(doc(300.0, 300.0)), InputEvent::Cancel]);

    assert_eq!(session.gesture_mode(), GestureMode::None);
    assert_eq!(session.selection(), committed);
    assert!(session.overlay().is_visible());
    assert_eq!(session.overlay().rect(), committed);

    // The release that follows belongs to no gesture.
    session.handle_event(&up(doc(300.0, 300.0)));
    assert_eq!(session.selection(), committed);
}

#[test]
fn test_cancel_move_puts_overlay_back() {
    let mut session = create_test_session();
    drag(&mut session, doc(10.0, 10.0), doc(60.0, 60.0));
    let committed = session.selection();

    session.handle_events(&[down(doc(20.0, 20.0)), move_to(doc(80.0, 90.0)), InputEvent::Cancel]);

    assert_eq!(session.overlay().rect(), committed);
    assert!(!session.overlay().is_moving());
}

#[test]
fn test_editing_disabled_ignores_pointer() {
    let mut session = CaptureSession::new(CameraConfig::default());
    session.set_layout(LayoutNode::root(SURFACE_ORIGIN));

    drag(&mut session, doc(10.0, 10.0), doc(60.0, 60.0));

    assert_eq!(session.gesture_mode(), GestureMode::None);
    assert_eq!(session.selection(), SelectionRect::ZERO);
    assert!(!session.overlay().is_visible());
}

#[test]
fn test_turning_editing_off_drops_selection() {
    let mut session = create_test_session();
    drag(&mut session, doc(10.0, 10.0), doc(60.0, 60.0));

    let mut config = session.config().clone();
    config.need_edit = false;
    session.set_config(config);

    assert_eq!(session.selection(), SelectionRect::ZERO);
    assert!(!session.overlay().is_visible());
}

#[test]
fn test_scrolled_document_translates_pointer() {
    let mut session = create_test_session();
    session.set_scroll(ScrollOffset::new(0.0, 30.0));

    // Document y of 90 over a surface at y=50 scrolled by 30 is local y=70.
    session.handle_events(&[
        down(Pos2::new(150.0, 90.0)),
        move_to(Pos2::new(170.0, 100.0)),
        up(Pos2::new(170.0, 100.0)),
    ]);

    assert_eq!(session.selection(), SelectionRect::new(50.0, 70.0, 20.0, 10.0));
}

#[test]
fn test_capture_refused_during_gesture() {
    let mut session = create_test_session();
    let source = TestPatternSource::new(600, 400);

    session.handle_events(&[down(doc(10.0, 10.0)), move_to(doc(50.0, 50.0))]);
    assert!(matches!(session.take(&source), Err(CaptureError::GestureInProgress)));

    session.handle_event(&up(doc(50.0, 50.0)));
    let image = session.take(&source).unwrap();
    assert_eq!((image.width(), image.height()), (40, 40));
}

#[test]
fn test_clear_and_flash() {
    let mut session = create_test_session();
    drag(&mut session, doc(10.0, 10.0), doc(60.0, 60.0));

    session.flash();
    assert!(session.overlay().is_visible());
    assert_eq!(session.overlay().rect(), session.selection());

    session.clear_selection();
    assert_eq!(session.selection(), SelectionRect::ZERO);
    assert!(!session.overlay().is_visible());

    // Nothing to re-affirm once cleared.
    session.flash();
    assert!(!session.overlay().is_visible());
}
