//! Tests for pan/zoom state and coordinate transforms.
use nagare::geometry::Delta;
use nagare::prelude::*;
use nagare::viewport::{MAX_ZOOM, MIN_ZOOM};

#[test]
fn test_default_viewport() {
    let viewport = Viewport::default();
    assert_eq!((viewport.pan_x(), viewport.pan_y(), viewport.zoom()), (0.0, 0.0, 1.0));
}

#[test]
fn test_pan_is_unclamped() {
    let mut viewport = Viewport::default();

    viewport.pan(-5000.0, 12.5);
    viewport.pan(-5000.0, 0.5);

    assert_eq!(viewport.pan_x(), -10000.0);
    assert_eq!(viewport.pan_y(), 13.0);
}

#[test]
fn test_zoom_steps_clamp_at_bounds() {
    let mut viewport = Viewport::default();

    for _ in 0..20 {
        viewport.zoom_in();
    }
    assert_eq!(viewport.zoom(), MAX_ZOOM);

    for _ in 0..30 {
        viewport.zoom_out();
    }
    assert_eq!(viewport.zoom(), MIN_ZOOM);

    viewport.zoom_in();
    assert_eq!(viewport.zoom(), 0.6);
}

#[test]
fn test_zoom_steps_keep_off_grid_offset() {
    let mut viewport = Viewport::new(0.0, 0.0, 1.55);

    viewport.zoom_in();
    assert_eq!(viewport.zoom(), 1.65);

    viewport.zoom_out();
    viewport.zoom_out();
    assert_eq!(viewport.zoom(), 1.45);
}

#[test]
fn test_constructor_clamps_zoom() {
    assert_eq!(Viewport::new(0.0, 0.0, 5.0).zoom(), MAX_ZOOM);
    assert_eq!(Viewport::new(0.0, 0.0, 0.1).zoom(), MIN_ZOOM);
}

#[test]
fn test_reset_restores_identity() {
    let mut viewport = Viewport::new(30.0, -40.0, 1.7);

    viewport.reset();

    assert_eq!(viewport, Viewport::default());
}

#[test]
fn test_screen_to_world_transform() {
    let viewport = Viewport::new(-20.0, 10.0, 1.5);

    let world = viewport.screen_to_world(Point::new(300.0, 300.0), Point::new(50.0, 50.0));

    assert_eq!(world, Point::new(180.0, 160.0));
}

#[test]
fn test_world_to_screen_inverts_transform() {
    let viewport = Viewport::new(-20.0, 10.0, 1.5);
    let origin = Point::new(50.0, 50.0);

    let screen = viewport.world_to_screen(Point::new(180.0, 160.0), origin);

    assert_eq!(screen, Point::new(300.0, 300.0));
}

#[test]
fn test_screen_delta_scales_by_zoom() {
    let viewport = Viewport::new(0.0, 0.0, 2.0);

    let delta = viewport.screen_delta_to_world(Delta { dx: 40.0, dy: -10.0 });

    assert_eq!(delta, Delta { dx: 20.0, dy: -5.0 });
}
