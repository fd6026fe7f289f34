//! Directed line segments and their relation to other segments and pads.

use geo::{BooleanOps, Intersects, Line, LineString, MultiLineString, Relate};
use serde::{Deserialize, Serialize};

use super::{Axis, Point, Rect, TOLERANCE};

/// A directed line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// The segment as a `geo` line.
    #[must_use]
    pub fn line(&self) -> Line<f64> {
        Line::new(self.start, self.end)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    /// Signed extent of the segment along `axis`.
    #[must_use]
    pub fn projection(&self, axis: Axis) -> f64 {
        self.end.coord(axis) - self.start.coord(axis)
    }

    /// Smallest coordinate of the segment along `axis`.
    #[must_use]
    pub fn min(&self, axis: Axis) -> f64 {
        self.start.coord(axis).min(self.end.coord(axis))
    }

    /// Largest coordinate of the segment along `axis`.
    #[must_use]
    pub fn max(&self, axis: Axis) -> f64 {
        self.start.coord(axis).max(self.end.coord(axis))
    }

    /// Returns true if the segment passes through the open interior of the
    /// rectangle. Running along its boundary or meeting it at a point does
    /// not count.
    #[must_use]
    pub fn overlaps_interior(&self, rect: &Rect) -> bool {
        let matrix = self.line().relate(&rect.to_polygon());
        matrix.is_intersects() && !matrix.is_touches()
    }

    /// Removes the part of the segment covered by the closed rectangle.
    ///
    /// Segments that only touch the rectangle are returned unchanged.
    /// Remnants keep the original direction, are ordered from start to end,
    /// and untouched endpoints are copied exactly.
    #[must_use]
    pub fn difference(&self, rect: &Rect) -> Vec<Self> {
        if !self.overlaps_interior(rect) {
            return vec![*self];
        }

        let strokes = MultiLineString::new(vec![LineString::from(self.line())]);
        let outside = rect.to_polygon().clip(&strokes, true);

        let mut remnants: Vec<(f64, Self)> = outside
            .iter()
            .filter_map(|piece| self.remnant(piece, rect))
            .collect();
        remnants.sort_by(|a, b| a.0.total_cmp(&b.0));
        remnants.into_iter().map(|(_, s)| s).collect()
    }

    /// Turns one clipped piece back into a sub-segment of `self`, keyed by
    /// where it starts along the segment.
    fn remnant(&self, piece: &LineString<f64>, rect: &Rect) -> Option<(f64, Self)> {
        let first = self.param(Point::from(*piece.0.first()?));
        let last = self.param(Point::from(*piece.0.last()?));
        let (t0, t1) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };
        if (t1 - t0) * self.length() <= TOLERANCE {
            return None;
        }
        Some((t0, Self::new(self.settle(t0, rect), self.settle(t1, rect))))
    }

    /// Parameter of `p` projected onto the segment, clamped to `[0, 1]`.
    fn param(&self, p: Point) -> f64 {
        let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let len_sq = dx.mul_add(dx, dy * dy);
        ((p.x - self.start.x).mul_add(dx, (p.y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0)
    }

    /// Point at parameter `t`, copied from an endpoint when it is one and
    /// otherwise placed on the segment and snapped onto the pad boundary.
    fn settle(&self, t: f64, rect: &Rect) -> Point {
        let p = self.start.lerp(self.end, t);
        if p.snaps_to(self.start) {
            self.start
        } else if p.snaps_to(self.end) {
            self.end
        } else {
            rect.snap(p)
        }
    }
}

/// Returns true if the two closed segments share at least one point,
/// including collinear overlap and endpoint contact.
#[must_use]
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    a.line().intersects(&b.line())
}
