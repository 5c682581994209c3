//! Resize snap resolution: snapping a dragged handle during a scale gesture.
//!
//! DESIGN
//! ======
//! One axis per call. The dragged handle point is compared against the
//! candidate points on that axis; if it is within the margin, the positional
//! gap is turned into a scale ratio relative to the object's current scaled
//! extent and applied to either the scale factors or the raw dimensions.
//! The object is then re-anchored on its center or on the point opposite the
//! handle, so only the dragged side moves.
//!
//! Both no-op exits (out of margin, zero ratio) leave the object untouched.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use serde::{Deserialize, Serialize};

use crate::anchor::{Anchor, Origin, build_contrary_point_map, build_point_map};
use crate::geom::{Axis, Point, nearest_on_axis};
use crate::host::Transformable;
use crate::snap::SnapMatch;

/// Which properties a resize writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Change `scale_x` / `scale_y`.
    #[default]
    Scale,
    /// Change `width` / `height`.
    Dimension,
}

/// Parameters of an in-progress resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeGesture {
    /// The handle being dragged.
    pub handle: Anchor,
    pub mode: ResizeMode,
    /// Keep the aspect ratio: a ratio found on one axis is applied to both.
    pub uniform: bool,
    /// Scale about the center instead of the opposite handle.
    pub centered: bool,
}

impl ResizeGesture {
    /// Whether snapping should be attempted along `axis` for this gesture.
    #[must_use]
    pub fn resolves_axis(&self, axis: Axis) -> bool {
        self.uniform || self.handle.moves_axis(axis)
    }
}

/// Grow or shrink `target` so its dragged handle moves by `delta` along `axis`.
///
/// `delta` is the desired change in the handle's world coordinate. Returns
/// `false`, leaving the object untouched, when the resulting ratio would be
/// zero or not finite.
pub fn apply_axis_delta<T: Transformable>(target: &mut T, gesture: &ResizeGesture, axis: Axis, delta: f64) -> bool {
    let shrinks_from_start = match axis {
        Axis::X => gesture.handle.is_left(),
        Axis::Y => gesture.handle.is_top(),
    };
    let mut growth = if shrinks_from_start { -delta } else { delta };
    // Centered scaling moves both sides at once.
    if gesture.centered {
        growth *= 2.0;
    }

    let dims = target.dimensions();
    let extent = dims.scalable_extent(axis);
    let ratio = (growth + extent) / extent;
    if ratio == 0.0 || !ratio.is_finite() {
        return false;
    }

    let corners = target.corners();
    let center = target.center();
    let anchor_point = build_contrary_point_map(&corners).get(gesture.handle);

    match (gesture.mode, axis) {
        (ResizeMode::Scale, Axis::X) => {
            let sy = if gesture.uniform { dims.scale_y * ratio } else { dims.scale_y };
            target.set_scale(dims.scale_x * ratio, sy);
        }
        (ResizeMode::Scale, Axis::Y) => {
            let sx = if gesture.uniform { dims.scale_x * ratio } else { dims.scale_x };
            target.set_scale(sx, dims.scale_y * ratio);
        }
        (ResizeMode::Dimension, Axis::X) => {
            let h = if gesture.uniform { dims.height * ratio } else { dims.height };
            target.set_size(dims.width * ratio, h);
        }
        (ResizeMode::Dimension, Axis::Y) => {
            let w = if gesture.uniform { dims.width * ratio } else { dims.width };
            target.set_size(w, dims.height * ratio);
        }
    }

    if gesture.centered {
        target.set_position_by_origin(center, Origin::CENTER);
    } else {
        target.set_position_by_origin(anchor_point, gesture.handle.opposite().origin());
    }
    target.set_coords();
    true
}

/// Snap the dragged handle to the nearest candidate along `axis`.
///
/// Returns the matches used, with `origin` at the handle's position after
/// the adjustment. Empty when nothing is within `margin` or the adjustment
/// would collapse the object.
pub fn resolve_axis<T: Transformable>(
    target: &mut T,
    gesture: &ResizeGesture,
    axis: Axis,
    candidates: &[Point],
    margin: f64,
) -> Vec<SnapMatch> {
    let dragged = build_point_map(&target.corners()).get(gesture.handle);
    let nearest = nearest_on_axis(dragged, candidates, axis);
    if !nearest.within(margin) {
        return Vec::new();
    }
    let Some(first) = nearest.matches.first() else {
        return Vec::new();
    };

    let delta = first.coord(axis) - dragged.coord(axis);
    if !apply_axis_delta(target, gesture, axis, delta) {
        return Vec::new();
    }

    let origin = build_point_map(&target.corners()).get(gesture.handle);
    nearest
        .matches
        .iter()
        .map(|candidate| SnapMatch { origin, target: *candidate })
        .collect()
}
