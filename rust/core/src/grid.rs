// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Screen/world conversions and grid snapping
//!
//! World space is the editor canvas at zoom 1: one grid unit spans
//! `grid_size` world units. Screen space is world space scaled by `zoom` and
//! then offset by `pan`.

use nalgebra::{Point2, Vector2};

/// Smallest zoom accepted by the conversions
pub const MIN_ZOOM_EPSILON: f64 = 1e-6;

/// Largest absolute wheel delta applied per event
const MAX_WHEEL_DELTA: f64 = 40.0;

/// Wheel delta to zoom exponent scale
const WHEEL_ZOOM_INTENSITY: f64 = 0.001;

#[inline]
fn safe_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > MIN_ZOOM_EPSILON {
        zoom
    } else {
        MIN_ZOOM_EPSILON
    }
}

#[inline]
pub fn screen_to_world(screen: Point2<f64>, pan: Vector2<f64>, zoom: f64) -> Point2<f64> {
    let zoom = safe_zoom(zoom);
    Point2::new((screen.x - pan.x) / zoom, (screen.y - pan.y) / zoom)
}

#[inline]
pub fn world_to_screen(world: Point2<f64>, pan: Vector2<f64>, zoom: f64) -> Point2<f64> {
    let zoom = safe_zoom(zoom);
    Point2::new(world.x * zoom + pan.x, world.y * zoom + pan.y)
}

/// Round a world coordinate to the nearest grid line.
///
/// Ties round toward positive infinity so snapping commutes with whole-cell
/// translations.
#[inline]
pub fn snap_to_grid(coord: f64, grid_size: f64) -> f64 {
    (coord / grid_size + 0.5).floor() * grid_size
}

/// Snap a world coordinate and express it in grid units
#[inline]
pub fn snap_to_cell(coord: f64, grid_size: f64) -> i32 {
    (snap_to_grid(coord, grid_size) / grid_size).round() as i32
}

#[inline]
pub fn snap_point(p: Point2<f64>, grid_size: f64) -> Point2<f64> {
    Point2::new(snap_to_grid(p.x, grid_size), snap_to_grid(p.y, grid_size))
}

/// Zoom factor for a mouse wheel delta
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    let clamped = delta_y.clamp(-MAX_WHEEL_DELTA, MAX_WHEEL_DELTA);
    (-clamped * WHEEL_ZOOM_INTENSITY).exp()
}

/// Pan and zoom of the editor canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan: Vector2<f64>,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vector2::zeros(),
            zoom: 1.0,
            min_zoom: 0.2,
            max_zoom: 5.0,
        }
    }
}

impl Viewport {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            ..Default::default()
        }
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Point2<f64>) -> Point2<f64> {
        screen_to_world(screen, self.pan, self.zoom)
    }

    #[inline]
    pub fn world_to_screen(&self, world: Point2<f64>) -> Point2<f64> {
        world_to_screen(world, self.pan, self.zoom)
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan += Vector2::new(dx, dy);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = safe_zoom(zoom.clamp(self.min_zoom, self.max_zoom));
    }

    /// Scale by `factor` keeping the world point under `anchor` fixed on screen
    pub fn zoom_at(&mut self, anchor: Point2<f64>, factor: f64) {
        let world = self.screen_to_world(anchor);
        self.set_zoom(self.zoom * factor);
        self.pan = Vector2::new(anchor.x - world.x * self.zoom, anchor.y - world.y * self.zoom);
    }

    /// Visible world rectangle `(min, max)` for a canvas of the given size
    pub fn visible_world(&self, canvas_width: f64, canvas_height: f64) -> (Point2<f64>, Point2<f64>) {
        let min = self.screen_to_world(Point2::origin());
        let max = self.screen_to_world(Point2::new(canvas_width, canvas_height));
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip() {
        let pans = [Vector2::new(0.0, 0.0), Vector2::new(-120.5, 33.25), Vector2::new(1e4, -7.0)];
        let zooms = [0.2, 1.0, 3.7, 5.0];
        let points = [Point2::new(0.0, 0.0), Point2::new(13.3, -401.9), Point2::new(999.0, 0.5)];

        for pan in pans {
            for zoom in zooms {
                for p in points {
                    let back = world_to_screen(screen_to_world(p, pan, zoom), pan, zoom);
                    assert_relative_eq!(back.x, p.x, epsilon = 1e-9, max_relative = 1e-12);
                    assert_relative_eq!(back.y, p.y, epsilon = 1e-9, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_zero_zoom_is_clamped() {
        let p = screen_to_world(Point2::new(10.0, 10.0), Vector2::zeros(), 0.0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(0.0, 50.0), 0.0);
        assert_eq!(snap_to_grid(24.9, 50.0), 0.0);
        assert_eq!(snap_to_grid(25.0, 50.0), 50.0);
        assert_eq!(snap_to_grid(-25.0, 50.0), 0.0);
        assert_eq!(snap_to_grid(-25.1, 50.0), -50.0);
        assert_eq!(snap_to_cell(149.0, 50.0), 3);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut viewport = Viewport::default();
        viewport.pan_by(40.0, -10.0);
        let anchor = Point2::new(300.0, 200.0);
        let before = viewport.screen_to_world(anchor);

        viewport.zoom_at(anchor, 2.0);
        let after = viewport.screen_to_world(anchor);

        assert_relative_eq!(viewport.zoom, 2.0);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_is_bounded() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(Point2::origin(), 100.0);
        assert_eq!(viewport.zoom, 5.0);
        viewport.zoom_at(Point2::origin(), 1e-6);
        assert_eq!(viewport.zoom, 0.2);
    }

    #[test]
    fn test_wheel_factor() {
        assert_relative_eq!(wheel_zoom_factor(0.0), 1.0);
        assert!(wheel_zoom_factor(10.0) < 1.0);
        assert_relative_eq!(wheel_zoom_factor(1000.0), wheel_zoom_factor(40.0));
    }
}
