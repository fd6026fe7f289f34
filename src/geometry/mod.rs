//! Planar geometry for outlines, pads and strokes.
//!
//! The predicates themselves come from [`geo`]: segment intersection and
//! pad overlap go through `Intersects` and `Relate`, polygon validity
//! through `Validation`, area and winding through `Area` and `Winding`,
//! and cutting a stroke out of a pad through `BooleanOps::clip`. This
//! module keeps the wire-facing types ([`Point`] as an `[x, y]` pair,
//! [`Rect`] with named bounds) and converts them at the boundary.
//!
//! - [`segment`]: directed edges and their relation to pads
//! - [`polygon`]: point rings as `geo` polygons
//! - [`merge`]: joining connected segments into maximal polylines

pub mod merge;
pub mod polygon;
pub mod segment;

pub use merge::{merge_segments, Polyline};
pub use polygon::{covers, is_ccw, is_simple, is_valid, signed_area};
pub use segment::{segments_intersect, Segment};

use geo::kernels::{Kernel, Orientation, RobustKernel};
use geo::{coord, Coord};
use serde::{Deserialize, Serialize};

/// Tolerance for lengths, areas and projections.
pub const TOLERANCE: f64 = 1e-9;

/// Distance under which two endpoints are treated as the same node.
pub const SNAP: f64 = TOLERANCE * 1000.0;

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// A 2D point, serialised as an `[x, y]` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate along `axis`.
    #[must_use]
    pub const fn coord(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Returns a copy of this point moved by `delta` along `axis`.
    #[must_use]
    pub fn translated(self, axis: Axis, delta: f64) -> Self {
        match axis {
            Axis::X => Self::new(self.x + delta, self.y),
            Axis::Y => Self::new(self.x, self.y + delta),
        }
    }

    /// Returns true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if the two points coincide within [`TOLERANCE`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= TOLERANCE && (self.y - other.y).abs() <= TOLERANCE
    }

    /// Returns true if the two points lie within [`SNAP`] of each other.
    #[must_use]
    pub fn snaps_to(self, other: Self) -> bool {
        (self.x - other.x).abs() <= SNAP && (self.y - other.y).abs() <= SNAP
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            (other.x - self.x).mul_add(t, self.x),
            (other.y - self.y).mul_add(t, self.y),
        )
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        coord! { x: p.x, y: p.y }
    }
}

impl From<Coord<f64>> for Point {
    fn from(c: Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

/// Orientation of `r` relative to the directed line `p -> q`, decided with
/// exact arithmetic.
#[must_use]
pub fn orient(p: Point, q: Point, r: Point) -> Orientation {
    RobustKernel::orient2d(p.into(), q.into(), r.into())
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum X.
    pub min_x: f64,
    /// Minimum Y.
    pub min_y: f64,
    /// Maximum X.
    pub max_x: f64,
    /// Maximum Y.
    pub max_y: f64,
}

impl Rect {
    /// Creates a rectangle from its bounds.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Lower bound along `axis`.
    #[must_use]
    pub const fn min(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }

    /// Upper bound along `axis`.
    #[must_use]
    pub const fn max(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }

    /// Returns true if the rectangle has finite bounds and positive extent
    /// on both axes.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.max_x - self.min_x > TOLERANCE
            && self.max_y - self.min_y > TOLERANCE
    }

    /// Moves coordinates of `p` that lie within [`SNAP`] of a bound onto it.
    #[must_use]
    pub fn snap(&self, p: Point) -> Point {
        let pull = |v: f64, lo: f64, hi: f64| {
            if (v - lo).abs() <= SNAP {
                lo
            } else if (v - hi).abs() <= SNAP {
                hi
            } else {
                v
            }
        };
        Point::new(
            pull(p.x, self.min_x, self.max_x),
            pull(p.y, self.min_y, self.max_y),
        )
    }

    /// The rectangle as a `geo` polygon.
    #[must_use]
    pub fn to_polygon(&self) -> geo::Polygon<f64> {
        geo::Rect::from(*self).to_polygon()
    }
}

impl From<Rect> for geo::Rect<f64> {
    fn from(r: Rect) -> Self {
        Self::new(
            coord! { x: r.min_x, y: r.min_y },
            coord! { x: r.max_x, y: r.max_y },
        )
    }
}
