//! The narrow interface the alignment core needs from a host canvas.
//!
//! The core never names a concrete scene-graph type. A host adapts its own
//! object model by implementing [`Transformable`] for its objects and
//! [`Scene`] for the canvas that owns them. [`crate::doc::DocStore`] and
//! [`crate::engine::Board`] are the in-crate reference adapter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::anchor::{Corners, Origin};
use crate::geom::{Axis, Point};

/// Unique identifier for a canvas object.
pub type ObjectId = Uuid;

/// Structural role of a canvas object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    /// A plain drawable object.
    #[default]
    Leaf,
    /// A real group. Only its leaves take part in snapping.
    Group { children: Vec<ObjectId> },
    /// A transient multi-object selection. Never a snap candidate; its
    /// members are excluded individually when it is the moving target.
    Selection { members: Vec<ObjectId> },
}

/// Size, scale and stroke of an object, as needed to turn a positional
/// delta into a scale ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub stroke_width: f64,
    /// Stroke keeps its width regardless of scale.
    pub stroke_uniform: bool,
}

impl Dimensions {
    /// The part of the rendered extent along `axis` that scales with the object.
    ///
    /// A uniform stroke is a fixed offset and is left out; a non-uniform
    /// stroke scales with the object and is included.
    #[must_use]
    pub fn scalable_extent(&self, axis: Axis) -> f64 {
        let (size, scale) = match axis {
            Axis::X => (self.width, self.scale_x),
            Axis::Y => (self.height, self.scale_y),
        };
        if self.stroke_uniform {
            size * scale
        } else {
            (size + self.stroke_width) * scale
        }
    }

    /// Rendered extent along `axis`, stroke included.
    #[must_use]
    pub fn rendered_extent(&self, axis: Axis) -> f64 {
        if self.stroke_uniform {
            self.scalable_extent(axis) + self.stroke_width
        } else {
            self.scalable_extent(axis)
        }
    }
}

/// A host object whose geometry the core reads and writes.
///
/// Mutators leave the cached corners stale until [`Transformable::set_coords`]
/// is called.
pub trait Transformable {
    fn id(&self) -> ObjectId;

    fn kind(&self) -> &ObjectKind;

    fn is_visible(&self) -> bool;

    /// Cached world-space corners.
    fn corners(&self) -> Corners;

    /// World-space center.
    fn center(&self) -> Point;

    /// Affine transform `[a, b, c, d, e, f]` mapping local to world space.
    fn transform_matrix(&self) -> [f64; 6];

    fn dimensions(&self) -> Dimensions;

    /// Whether corner drags keep the aspect ratio by default.
    fn uniform_scaling(&self) -> bool;

    fn set_scale(&mut self, scale_x: f64, scale_y: f64);

    fn set_size(&mut self, width: f64, height: f64);

    /// Move the object so that the point at `origin` lands on `point`.
    fn set_position_by_origin(&mut self, point: Point, origin: Origin);

    /// Recompute cached corners after a mutation.
    fn set_coords(&mut self);
}

/// A host canvas: the set of objects plus viewport state.
pub trait Scene {
    type Object: Transformable;

    /// Top-level objects in draw order. Group children and selections are not listed.
    fn objects(&self) -> Vec<ObjectId>;

    fn object(&self, id: &ObjectId) -> Option<&Self::Object>;

    fn object_mut(&mut self, id: &ObjectId) -> Option<&mut Self::Object>;

    /// Whether any part of the object falls inside the viewport.
    fn is_on_screen(&self, id: &ObjectId) -> bool;

    /// Current zoom factor (1.0 = no zoom).
    fn zoom(&self) -> f64;

    /// Translate an object, and anything it contains, by `(dx, dy)` world units.
    fn translate_object(&mut self, id: &ObjectId, dx: f64, dy: f64);
}
