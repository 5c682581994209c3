//! Pan/zoom camera for the editing surface.
//!
//! The camera maps world coordinates (where objects and guides live) to
//! screen coordinates (CSS pixels on the canvas element). The guide layer
//! reads its zoom and viewport transform so snap margins and line widths
//! stay constant on screen.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::geom::{Point, Rect};

/// Camera state for pan/zoom on the canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// World-to-screen transform as `[a, b, c, d, e, f]`.
    #[must_use]
    pub fn viewport_transform(&self) -> [f64; 6] {
        [self.zoom, 0.0, 0.0, self.zoom, self.pan_x, self.pan_y]
    }

    /// The world-space rectangle visible in a `width` × `height` viewport.
    #[must_use]
    pub fn visible_world_rect(&self, width: f64, height: f64) -> Rect {
        Rect {
            min: self.screen_to_world(Point::new(0.0, 0.0)),
            max: self.screen_to_world(Point::new(width, height)),
        }
    }

    /// Zoom by `factor`, keeping the world point under `screen` fixed.
    ///
    /// The resulting zoom is clamped to [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x = screen.x - anchor.x * self.zoom;
        self.pan_y = screen.y - anchor.y * self.zoom;
    }
}
