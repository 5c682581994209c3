//! Point maps: the eight named reference points of an object.
//!
//! A [`PointMap`] holds the four corners and four edge midpoints of an
//! object in world space. The contrary map swaps diagonal corners so that a
//! lookup keyed by the handle being dragged yields the point that must stay
//! fixed during an anchored resize.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Axis, Point, midpoint};

/// One of the eight reference points of an object, also used to name resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Top-left corner.
    Tl,
    /// Top-right corner.
    Tr,
    /// Bottom-right corner.
    Br,
    /// Bottom-left corner.
    Bl,
    /// Middle of the top edge.
    Mt,
    /// Middle of the right edge.
    Mr,
    /// Middle of the bottom edge.
    Mb,
    /// Middle of the left edge.
    Ml,
}

impl Anchor {
    /// All anchors, corners first.
    pub const ALL: [Self; 8] = [Self::Tl, Self::Tr, Self::Br, Self::Bl, Self::Mt, Self::Mr, Self::Mb, Self::Ml];

    /// The diagonally (or, for midpoints, directly) opposite anchor.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Tl => Self::Br,
            Self::Tr => Self::Bl,
            Self::Br => Self::Tl,
            Self::Bl => Self::Tr,
            Self::Mt => Self::Mb,
            Self::Mr => Self::Ml,
            Self::Mb => Self::Mt,
            Self::Ml => Self::Mr,
        }
    }

    /// Whether the anchor sits on the left edge.
    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Self::Tl | Self::Bl | Self::Ml)
    }

    /// Whether the anchor sits on the top edge.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::Tl | Self::Tr | Self::Mt)
    }

    /// Whether dragging this handle changes the object's extent along `axis`.
    #[must_use]
    pub fn moves_axis(self, axis: Axis) -> bool {
        match axis {
            Axis::X => !matches!(self, Self::Mt | Self::Mb),
            Axis::Y => !matches!(self, Self::Ml | Self::Mr),
        }
    }

    /// The transform origin that coincides with this anchor.
    #[must_use]
    pub fn origin(self) -> Origin {
        match self {
            Self::Tl => Origin::new(0.0, 0.0),
            Self::Tr => Origin::new(1.0, 0.0),
            Self::Br => Origin::new(1.0, 1.0),
            Self::Bl => Origin::new(0.0, 1.0),
            Self::Mt => Origin::new(0.5, 0.0),
            Self::Mr => Origin::new(1.0, 0.5),
            Self::Mb => Origin::new(0.5, 1.0),
            Self::Ml => Origin::new(0.0, 0.5),
        }
    }
}

/// A position inside an object's box, as fractions of its width and height.
///
/// `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right, before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub fx: f64,
    pub fy: f64,
}

impl Origin {
    pub const CENTER: Self = Self { fx: 0.5, fy: 0.5 };

    #[must_use]
    pub fn new(fx: f64, fy: f64) -> Self {
        Self { fx, fy }
    }
}

/// The four world-space corners of an object.
///
/// Hosts often report corners as a positional array; the order is fixed as
/// `[tl, tr, br, bl]` and [`Corners::from_array`] is the only place that
/// relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Corners {
    pub tl: Point,
    pub tr: Point,
    pub br: Point,
    pub bl: Point,
}

impl Corners {
    /// Build from `[tl, tr, br, bl]`.
    #[must_use]
    pub fn from_array(points: [Point; 4]) -> Self {
        let [tl, tr, br, bl] = points;
        Self { tl, tr, br, bl }
    }

    /// Corners in `[tl, tr, br, bl]` order.
    #[must_use]
    pub fn to_array(self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// Center of the box: the midpoint of either diagonal.
    #[must_use]
    pub fn center(&self) -> Point {
        midpoint(self.tl, self.br)
    }

    /// The same box with diagonal corners exchanged (tl↔br, tr↔bl).
    #[must_use]
    pub fn swapped(self) -> Self {
        Self { tl: self.br, tr: self.bl, br: self.tl, bl: self.tr }
    }
}

/// The eight named reference points of an object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointMap {
    pub tl: Point,
    pub tr: Point,
    pub br: Point,
    pub bl: Point,
    pub mt: Point,
    pub mr: Point,
    pub mb: Point,
    pub ml: Point,
}

impl PointMap {
    /// Look up the point for `anchor`.
    #[must_use]
    pub fn get(&self, anchor: Anchor) -> Point {
        match anchor {
            Anchor::Tl => self.tl,
            Anchor::Tr => self.tr,
            Anchor::Br => self.br,
            Anchor::Bl => self.bl,
            Anchor::Mt => self.mt,
            Anchor::Mr => self.mr,
            Anchor::Mb => self.mb,
            Anchor::Ml => self.ml,
        }
    }

    /// All eight points in [`Anchor::ALL`] order.
    #[must_use]
    pub fn values(&self) -> [Point; 8] {
        [self.tl, self.tr, self.br, self.bl, self.mt, self.mr, self.mb, self.ml]
    }
}

fn point_map_from(c: Corners) -> PointMap {
    PointMap {
        tl: c.tl,
        tr: c.tr,
        br: c.br,
        bl: c.bl,
        mt: midpoint(c.tl, c.tr),
        mr: midpoint(c.tr, c.br),
        mb: midpoint(c.br, c.bl),
        ml: midpoint(c.bl, c.tl),
    }
}

/// The object's own anchors: its corners plus the four edge midpoints.
#[must_use]
pub fn build_point_map(corners: &Corners) -> PointMap {
    point_map_from(*corners)
}

/// Anchors with diagonal corners swapped and midpoints recomputed from the
/// swapped corners, so `contrary.get(handle)` is the point opposite `handle`.
#[must_use]
pub fn build_contrary_point_map(corners: &Corners) -> PointMap {
    point_map_from(corners.swapped())
}
