//! Document model: board objects and the in-memory store.
//!
//! This is the crate's reference host object model. `BoardObject` carries
//! position, size, scale, rotation and stroke, and implements
//! [`Transformable`]; `DocStore` owns every live object, including group
//! children and the transient selection, and knows which ones are top-level.
//!
//! Positions are stored in world space for every object, group children
//! included. `x`/`y` is the top-left of the unrotated rendered box and
//! rotation is applied about its center.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::anchor::{Corners, Origin};
use crate::geom::{Axis, Point, Rect};
use crate::host::{Dimensions, ObjectId, ObjectKind, Transformable};

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

/// A board object as stored in the document and in history snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Leaf, group or selection.
    #[serde(default)]
    pub kind: ObjectKind,
    /// Left edge of the unrotated rendered box in world coordinates.
    pub x: f64,
    /// Top edge of the unrotated rendered box in world coordinates.
    pub y: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    /// Clockwise rotation in degrees around the box center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub stroke_width: f64,
    /// Stroke keeps its width when the object is scaled.
    #[serde(default)]
    pub stroke_uniform: bool,
    /// Corner drags keep the aspect ratio unless the modifier is held.
    #[serde(default)]
    pub uniform_scaling: bool,
    #[serde(default = "yes")]
    pub visible: bool,
    /// Stacking order; lower values are drawn beneath higher values.
    #[serde(default)]
    pub z_index: i64,
    /// Open-ended per-object properties (fill, text, etc.).
    #[serde(default)]
    pub props: serde_json::Value,
    #[serde(skip)]
    coords: Corners,
}

impl BoardObject {
    /// A visible, unrotated, unscaled leaf with no stroke.
    #[must_use]
    pub fn new(id: ObjectId, x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut obj = Self {
            id,
            kind: ObjectKind::Leaf,
            x,
            y,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            stroke_width: 0.0,
            stroke_uniform: false,
            uniform_scaling: false,
            visible: true,
            z_index: 0,
            props: serde_json::Value::Null,
            coords: Corners::default(),
        };
        obj.set_coords();
        obj
    }

    /// Rendered width and height, stroke included.
    #[must_use]
    pub fn rendered_size(&self) -> (f64, f64) {
        let dims = self.dimensions();
        (dims.rendered_extent(Axis::X), dims.rendered_extent(Axis::Y))
    }

    /// Axis-aligned bounds of the cached corners.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let pts = self.coords.to_array();
        Rect::enclosing(&pts).unwrap_or_default()
    }

    fn compute_corners(&self) -> Corners {
        let (w, h) = self.rendered_size();
        let center = Point::new(self.x + w / 2.0, self.y + h / 2.0);
        let angle = self.rotation.to_radians();
        let corner = |dx: f64, dy: f64| {
            let r = Point::new(dx, dy).rotate(angle);
            center.offset(r.x, r.y)
        };
        Corners {
            tl: corner(-w / 2.0, -h / 2.0),
            tr: corner(w / 2.0, -h / 2.0),
            br: corner(w / 2.0, h / 2.0),
            bl: corner(-w / 2.0, h / 2.0),
        }
    }
}

impl Transformable for BoardObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn corners(&self) -> Corners {
        self.coords
    }

    fn center(&self) -> Point {
        let (w, h) = self.rendered_size();
        Point::new(self.x + w / 2.0, self.y + h / 2.0)
    }

    fn transform_matrix(&self) -> [f64; 6] {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let c = self.center();
        [cos * self.scale_x, sin * self.scale_x, -sin * self.scale_y, cos * self.scale_y, c.x, c.y]
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            stroke_width: self.stroke_width,
            stroke_uniform: self.stroke_uniform,
        }
    }

    fn uniform_scaling(&self) -> bool {
        self.uniform_scaling
    }

    fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn set_position_by_origin(&mut self, point: Point, origin: Origin) {
        let (w, h) = self.rendered_size();
        let local = Point::new((origin.fx - 0.5) * w, (origin.fy - 0.5) * h).rotate(self.rotation.to_radians());
        let center = Point::new(point.x - local.x, point.y - local.y);
        self.x = center.x - w / 2.0;
        self.y = center.y - h / 2.0;
    }

    fn set_coords(&mut self) {
        self.coords = self.compute_corners();
    }
}

/// In-memory store of board objects.
pub struct DocStore {
    objects: HashMap<ObjectId, BoardObject>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new() }
    }

    /// Insert or replace an object, refreshing its cached corners.
    pub fn insert(&mut self, mut obj: BoardObject) {
        obj.set_coords();
        self.objects.insert(obj.id, obj);
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&BoardObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut BoardObject> {
        self.objects.get_mut(id)
    }

    /// Replace all objects with a full snapshot.
    pub fn load_snapshot(&mut self, objects: Vec<BoardObject>) {
        self.objects.clear();
        for obj in objects {
            self.insert(obj);
        }
    }

    /// All objects sorted by `(z_index, id)`, as a serializable dump.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BoardObject> {
        self.sorted_objects().into_iter().cloned().collect()
    }

    /// Return all objects sorted by `(z_index, id)` for draw-order.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&BoardObject> {
        let mut objs: Vec<&BoardObject> = self.objects.values().collect();
        objs.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        objs
    }

    /// Top-level objects in draw order: not a group child, not a selection.
    #[must_use]
    pub fn top_level(&self) -> Vec<ObjectId> {
        let children: HashSet<ObjectId> = self
            .objects
            .values()
            .filter_map(|o| match &o.kind {
                ObjectKind::Group { children } => Some(children.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect();
        self.sorted_objects()
            .into_iter()
            .filter(|o| !matches!(o.kind, ObjectKind::Selection { .. }) && !children.contains(&o.id))
            .map(|o| o.id)
            .collect()
    }

    /// Translate an object and, for groups and selections, everything inside it.
    pub fn translate_tree(&mut self, id: &ObjectId, dx: f64, dy: f64) {
        let mut pending = vec![*id];
        let mut seen = HashSet::new();
        while let Some(next) = pending.pop() {
            if !seen.insert(next) {
                continue;
            }
            let Some(obj) = self.objects.get_mut(&next) else {
                continue;
            };
            obj.x += dx;
            obj.y += dy;
            obj.set_coords();
            match &obj.kind {
                ObjectKind::Leaf => {}
                ObjectKind::Group { children } => pending.extend(children.iter().copied()),
                ObjectKind::Selection { members } => pending.extend(members.iter().copied()),
            }
        }
    }

    /// Number of objects currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
