use crate::geometry::{Delta, Point};
use serde::Serialize;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Pan offset and zoom factor applied to the content layer.
///
/// Pan is a screen-space translation; zoom always stays within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pan_x: f64,
    pan_y: f64,
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Creates a viewport, clamping `zoom` into range.
    pub fn new(pan_x: f64, pan_y: f64, zoom: f64) -> Self {
        Self {
            pan_x,
            pan_y,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Translates the content layer by a raw screen delta. Unclamped.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn zoom_in(&mut self) {
        self.step_zoom(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.step_zoom(-ZOOM_STEP);
    }

    // Only float drift is rounded away; an off-grid zoom keeps its offset.
    fn step_zoom(&mut self, step: f64) {
        let stepped = ((self.zoom + step) * 1e9).round() / 1e9;
        self.zoom = stepped.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Converts a screen position to world coordinates relative to the canvas origin.
    pub fn screen_to_world(&self, screen: Point, canvas_origin: Point) -> Point {
        Point::new(
            (screen.x - canvas_origin.x - self.pan_x) / self.zoom,
            (screen.y - canvas_origin.y - self.pan_y) / self.zoom,
        )
    }

    /// Inverse of [`Viewport::screen_to_world`].
    pub fn world_to_screen(&self, world: Point, canvas_origin: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan_x + canvas_origin.x,
            world.y * self.zoom + self.pan_y + canvas_origin.y,
        )
    }

    /// Scales an on-screen displacement to world units.
    pub fn screen_delta_to_world(&self, delta: Delta) -> Delta {
        Delta {
            dx: delta.dx / self.zoom,
            dy: delta.dy / self.zoom,
        }
    }
}
