//! Geometry primitives: points, axes, and nearest-coordinate search.
//!
//! Everything here is pure. Points live in canvas/world space and are
//! produced fresh on every computation.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The coordinate of this point along `axis`.
    #[must_use]
    pub fn coord(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Return this point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Rotate this point (treated as a vector) clockwise by `radians` in
    /// y-down canvas space.
    #[must_use]
    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { x: self.x * cos - self.y * sin, y: self.x * sin + self.y * cos }
    }
}

/// A canvas axis. Vertical guides align X coordinates; horizontal guides align Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned rectangle given by its min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Smallest rectangle enclosing all `points`. `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut rect = Self { min: *first, max: *first };
        for p in &points[1..] {
            rect.min.x = rect.min.x.min(p.x);
            rect.min.y = rect.min.y.min(p.y);
            rect.max.x = rect.max.x.max(p.x);
            rect.max.y = rect.max.y.max(p.y);
        }
        Some(rect)
    }

    /// Whether the two rectangles overlap. Touching edges count as overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x && self.min.y <= other.max.y && other.min.y <= self.max.y
    }
}

/// Result of a nearest-on-axis scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    /// Minimum absolute coordinate difference; `+∞` when there were no candidates.
    pub distance: f64,
    /// Every candidate achieving `distance`, in scan order.
    pub matches: Vec<Point>,
}

impl Nearest {
    /// Whether a match exists within `margin` (inclusive).
    #[must_use]
    pub fn within(&self, margin: f64) -> bool {
        !self.matches.is_empty() && self.distance <= margin
    }
}

/// Absolute difference between two coordinates.
#[must_use]
pub fn distance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Arithmetic mean of two points.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point { x: (a.x + b.x) / 2.0, y: (a.y + b.y) / 2.0 }
}

/// Find the candidates closest to `point` along `axis`.
///
/// All candidates tied at the minimum are returned, not only the first.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn nearest_on_axis(point: Point, candidates: &[Point], axis: Axis) -> Nearest {
    let target = point.coord(axis);
    let mut best = Nearest { distance: f64::INFINITY, matches: Vec::new() };
    for candidate in candidates {
        let d = distance(target, candidate.coord(axis));
        if d < best.distance {
            best.distance = d;
            best.matches.clear();
        }
        if d == best.distance {
            best.matches.push(*candidate);
        }
    }
    best
}
