use eframe_camera::geometry::SelectionRect;
use eframe_camera::selection::{OverlayStyle, SelectionOverlay};
use egui::{Pos2, Vec2};

fn initialized_overlay() -> SelectionOverlay {
    let mut overlay = SelectionOverlay::new(OverlayStyle::default());
    overlay.init();
    overlay
}

#[test]
fn test_init_is_hidden_at_origin() {
    let overlay = initialized_overlay();
    assert!(!overlay.is_visible());
    assert_eq!(overlay.rect(), SelectionRect::ZERO);
}

#[test]
fn test_refresh_shows_and_stores() {
    let mut overlay = initialized_overlay();
    let rect = SelectionRect::new(5.0, 6.0, 70.0, 80.0);

    overlay.refresh(rect);

    assert!(overlay.is_visible());
    assert_eq!(overlay.rect(), rect);
}

#[test]
fn test_hide_then_refresh_is_visible() {
    let mut overlay = initialized_overlay();
    overlay.refresh(SelectionRect::new(5.0, 6.0, 70.0, 80.0));

    overlay.hide();
    assert!(!overlay.is_visible());
    assert_eq!(overlay.rect(), SelectionRect::new(5.0, 6.0, 70.0, 80.0));

    overlay.refresh(SelectionRect::new(1.0, 1.0, 2.0, 2.0));
    assert!(overlay.is_visible());
}

#[test]
fn test_flash_keeps_geometry() {
    let mut overlay = initialized_overlay();
    let rect = SelectionRect::new(5.0, 6.0, 70.0, 80.0);
    overlay.refresh(rect);

    overlay.flash();

    assert!(overlay.is_visible());
    assert_eq!(overlay.rect(), rect);
}

#[test]
fn test_hidden_overlay_is_not_hit_and_cannot_move() {
    let mut overlay = initialized_overlay();
    overlay.refresh(SelectionRect::new(0.0, 0.0, 50.0, 50.0));
    assert!(overlay.contains(Pos2::new(25.0, 25.0)));

    overlay.hide();

    assert!(!overlay.contains(Pos2::new(25.0, 25.0)));
    assert!(!overlay.begin_move(Pos2::new(25.0, 25.0)));
    assert!(!overlay.is_moving());
}

#[test]
fn test_uninitialized_overlay_cannot_move() {
    let mut overlay = SelectionOverlay::default();
    overlay.refresh(SelectionRect::new(0.0, 0.0, 50.0, 50.0));
    assert!(!overlay.begin_move(Pos2::new(25.0, 25.0)));
}

#[test]
fn test_move_uses_delta_since_previous_position() {
    let mut overlay = initialized_overlay();
    overlay.refresh(SelectionRect::new(10.0, 10.0, 40.0, 30.0));

    assert!(overlay.begin_move(Pos2::new(300.0, 300.0)));
    assert_eq!(overlay.drag_to(Pos2::new(305.0, 301.0)), Some(Vec2::new(5.0, 1.0)));
    assert_eq!(overlay.drag_to(Pos2::new(303.0, 310.0)), Some(Vec2::new(-2.0, 9.0)));

    assert_eq!(overlay.end_move(), Some(SelectionRect::new(13.0, 20.0, 40.0, 30.0)));
    assert!(!overlay.is_moving());
    assert_eq!(overlay.drag_to(Pos2::new(0.0, 0.0)), None);
}
