//! Overlay drawing contract.
//!
//! Guides are drawn on a transient layer that sits above the object layer.
//! [`OverlayContext`] is the small subset of a 2D canvas context the guide
//! renderer needs, plus the zoom and viewport transform it reads to keep
//! line widths visually constant. [`crate::web::WebOverlay`] implements it
//! over a browser canvas; [`DisplayList`] records the calls instead, for
//! headless hosts and tests.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::geom::Point;

/// Affine transform `[a, b, c, d, e, f]` with no scale, rotation or offset.
pub const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Drawing surface for the transient guide layer.
pub trait OverlayContext {
    /// Current canvas zoom factor.
    fn zoom(&self) -> f64;

    /// World-to-screen transform `[a, b, c, d, e, f]`.
    fn viewport_transform(&self) -> [f64; 6];

    /// Update the zoom and viewport transform, typically from the host camera.
    fn set_view(&mut self, zoom: f64, viewport_transform: [f64; 6]);

    /// Wipe the whole layer.
    fn clear(&mut self);

    fn save(&mut self);

    fn restore(&mut self);

    fn set_transform(&mut self, matrix: [f64; 6]);

    fn set_stroke_style(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    fn set_line_dash(&mut self, segments: &[f64]);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    fn stroke(&mut self);
}

/// One recorded overlay call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    SetTransform([f64; 6]),
    StrokeStyle(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
}

/// An overlay that records draw calls instead of rasterizing them.
///
/// Clearing discards everything recorded so far, so `commands()` always
/// reflects what is currently visible on the layer.
#[derive(Debug, Clone)]
pub struct DisplayList {
    zoom: f64,
    viewport_transform: [f64; 6],
    commands: Vec<DrawCommand>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self { zoom: 1.0, viewport_transform: IDENTITY, commands: Vec::new() }
    }
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `stroke()` calls since the last clear.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Stroke)).count()
    }

    /// Every line segment drawn since the last clear, as `(from, to)` pairs.
    #[must_use]
    pub fn segments(&self) -> Vec<(Point, Point)> {
        let mut out = Vec::new();
        let mut cursor = None;
        for command in &self.commands {
            match command {
                DrawCommand::MoveTo(p) => cursor = Some(*p),
                DrawCommand::LineTo(p) => {
                    if let Some(from) = cursor {
                        out.push((from, *p));
                    }
                    cursor = Some(*p);
                }
                DrawCommand::BeginPath => cursor = None,
                _ => {}
            }
        }
        out
    }
}

impl OverlayContext for DisplayList {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn viewport_transform(&self) -> [f64; 6] {
        self.viewport_transform
    }

    fn set_view(&mut self, zoom: f64, viewport_transform: [f64; 6]) {
        self.zoom = zoom;
        self.viewport_transform = viewport_transform;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_transform(&mut self, matrix: [f64; 6]) {
        self.commands.push(DrawCommand::SetTransform(matrix));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.commands.push(DrawCommand::LineDash(segments.to_vec()));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(Point::new(x, y)));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}
