//! Snap-point collection for move gestures.
//!
//! DESIGN
//! ======
//! Each axis is handled independently. For every check point on the moving
//! object we find the nearest candidate coordinates; the smallest of those
//! distances decides the axis. If it is within the margin, every check point
//! sitting at that distance contributes one match per tied candidate, so
//! ties produce the full cross product. Nothing is cached between calls.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};

use crate::anchor::{Corners, PointMap};
use crate::geom::{Axis, Point, nearest_on_axis};

/// "This point on the moving object aligns with this point on a stationary object."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapMatch {
    pub origin: Point,
    pub target: Point,
}

impl SnapMatch {
    /// Signed distance from origin to target along `axis`.
    #[must_use]
    pub fn delta(&self, axis: Axis) -> f64 {
        self.target.coord(axis) - self.origin.coord(axis)
    }
}

/// Matches for both axes. `vertical` aligns X coordinates, `horizontal` aligns Y.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapMatches {
    pub vertical: Vec<SnapMatch>,
    pub horizontal: Vec<SnapMatch>,
}

impl SnapMatches {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// The points checked on a moving object: its four corners and its center.
#[must_use]
pub fn move_check_points(corners: &Corners) -> [Point; 5] {
    [corners.tl, corners.tr, corners.br, corners.bl, corners.center()]
}

/// Flatten a candidate pool into a single list of points.
#[must_use]
pub fn candidate_points(pool: &[PointMap]) -> Vec<Point> {
    pool.iter().flat_map(PointMap::values).collect()
}

/// Collect matches on one axis. `margin` is in world units.
#[must_use]
pub fn collect_axis(check_points: &[Point], candidates: &[Point], axis: Axis, margin: f64) -> Vec<SnapMatch> {
    let nearest: Vec<_> = check_points
        .iter()
        .map(|p| nearest_on_axis(*p, candidates, axis))
        .collect();

    let min = nearest.iter().map(|n| n.distance).fold(f64::INFINITY, f64::min);
    if min.is_nan() || margin.is_nan() || min > margin {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for (origin, found) in check_points.iter().zip(&nearest) {
        #[allow(clippy::float_cmp)]
        let at_min = found.distance == min;
        if !at_min {
            continue;
        }
        matches.extend(found.matches.iter().map(|target| SnapMatch { origin: *origin, target: *target }));
    }
    matches
}

/// Collect matches on both axes for a moving object.
#[must_use]
pub fn collect_snap_matches(check_points: &[Point], pool: &[PointMap], margin: f64) -> SnapMatches {
    let candidates = candidate_points(pool);
    SnapMatches {
        vertical: collect_axis(check_points, &candidates, Axis::X, margin),
        horizontal: collect_axis(check_points, &candidates, Axis::Y, margin),
    }
}

/// Offset along `axis` that brings the first match's origin onto its target.
/// Zero when there are no matches.
#[must_use]
pub fn snap_offset(matches: &[SnapMatch], axis: Axis) -> f64 {
    matches.first().map_or(0.0, |m| m.delta(axis))
}
