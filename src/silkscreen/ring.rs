//! The working polygon: a counter-clockwise point ring with per-edge locks.
//!
//! Edge `i` runs from point `i` to point `(i + 1) % len`; `locks[i]` belongs
//! to that edge. All index arithmetic is cyclic.

use serde::Serialize;

use super::direction::{Direction, Lock};
use super::error::{SilkscreenError, SilkscreenResult};
use crate::geometry::{polygon, Axis, Point, Segment, TOLERANCE};

/// A simple, counter-clockwise polygon boundary with orientation locks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ring {
    points: Vec<Point>,
    locks: Vec<Lock>,
}

impl Ring {
    /// Validates an outline and normalises it to counter-clockwise order.
    ///
    /// A clockwise outline is reversed and every lock is negated and moved
    /// along with the edge it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`SilkscreenError::MalformedInput`] if there are fewer than
    /// three points, the lock count differs from the point count, any
    /// coordinate is not finite, or the outline is not a simple polygon
    /// with non-zero area.
    pub fn new(points: Vec<Point>, locks: Vec<Lock>) -> SilkscreenResult<Self> {
        let n = points.len();
        if n < 3 {
            return Err(SilkscreenError::malformed(format!(
                "outline needs at least 3 points, got {n}"
            )));
        }
        if locks.len() != n {
            return Err(SilkscreenError::malformed(format!(
                "outline has {n} points but {} locks",
                locks.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(SilkscreenError::malformed(format!(
                "outline point {i} has a non-finite coordinate"
            )));
        }
        if let Some(i) = polygon::edges(&points).position(|e| e.length() <= TOLERANCE) {
            return Err(SilkscreenError::malformed(format!(
                "outline edge {i} has zero length"
            )));
        }
        if !polygon::is_simple(&points) {
            return Err(SilkscreenError::malformed("outline is self-intersecting"));
        }
        let area = polygon::signed_area(&points);
        if area.abs() <= TOLERANCE {
            return Err(SilkscreenError::malformed("outline encloses no area"));
        }

        if polygon::is_ccw(&points) {
            return Ok(Self { points, locks });
        }

        let mut reversed = points;
        reversed.reverse();
        let locks = (0..n)
            .map(|m| locks[(2 * n - 2 - m) % n].map(Direction::negated))
            .collect();
        Ok(Self {
            points: reversed,
            locks,
        })
    }

    /// Builds an unlocked ring without validation, for intermediate states.
    #[cfg(test)]
    pub(crate) fn from_raw(points: Vec<Point>) -> Self {
        let locks = vec![None; points.len()];
        Self { points, locks }
    }

    /// Creates a ring with every edge unlocked.
    ///
    /// # Errors
    ///
    /// See [`Ring::new`].
    pub fn unlocked(points: Vec<Point>) -> SilkscreenResult<Self> {
        let locks = vec![None; points.len()];
        Self::new(points, locks)
    }

    /// Number of points (and edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed ring; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertices in ring order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Edge locks, parallel to [`Ring::points`].
    #[must_use]
    pub fn locks(&self) -> &[Lock] {
        &self.locks
    }

    /// Lock on edge `i` (cyclic).
    #[must_use]
    pub fn lock(&self, i: usize) -> Lock {
        self.locks[i % self.len()]
    }

    /// Edge `i` (cyclic).
    #[must_use]
    pub fn edge(&self, i: usize) -> Segment {
        let n = self.len();
        Segment::new(self.points[i % n], self.points[(i + 1) % n])
    }

    /// Iterates over all edges in ring order.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        polygon::edges(&self.points)
    }

    /// Index reached by stepping `distance` edges forwards from `i`.
    #[must_use]
    pub fn forward(&self, i: usize, distance: usize) -> usize {
        (i + distance) % self.len()
    }

    /// Index reached by stepping `distance` edges backwards from `i`.
    #[must_use]
    pub fn backward(&self, i: usize, distance: usize) -> usize {
        let n = self.len();
        (i + n - distance % n) % n
    }

    /// Signed area; positive while the ring stays counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        polygon::signed_area(&self.points)
    }

    /// Returns true if the ring is simple with non-zero area.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        polygon::is_valid(&self.points)
    }

    /// Returns true if this ring's closed polygon covers the boundary of
    /// `other`, which may be self-intersecting.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        polygon::covers(&self.points, &other.points)
    }

    /// Total boundary length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|e| e.length()).sum()
    }

    /// Translates the contiguous run of edges `first..=last` (cyclic) by
    /// `delta` along `axis`.
    ///
    /// The run's points are moved and the original first and end points are
    /// kept as anchors, so two unlocked bridging edges join the moved run
    /// to the rest of the ring. Points keep their original relative order
    /// and index origin. The run must leave at least one edge untouched.
    pub(crate) fn translate_span(&mut self, first: usize, last: usize, axis: Axis, delta: f64) {
        let n = self.len();
        let span_edges = (last + n - first) % n + 1;
        debug_assert!(span_edges < n, "span must leave an edge unmoved");
        let end = (last + 1) % n;
        let in_span = |i: usize| (i + n - first) % n <= span_edges;

        let mut points = Vec::with_capacity(n + 2);
        let mut locks = Vec::with_capacity(n + 2);
        for (i, (&point, &lock)) in self.points.iter().zip(&self.locks).enumerate() {
            let moved = if in_span(i) {
                point.translated(axis, delta)
            } else {
                point
            };
            if i == first {
                points.push(point);
                locks.push(None);
            }
            if i == end {
                points.push(moved);
                locks.push(None);
                points.push(point);
                locks.push(lock);
            } else {
                points.push(moved);
                locks.push(lock);
            }
        }
        self.points = points;
        self.locks = locks;
    }

    /// Deletes points `start + 1 ..= end` (cyclic) and clears the lock on
    /// edge `start`, which now bridges directly to the point after `end`.
    pub(crate) fn delete_span(&mut self, start: usize, end: usize) {
        let n = self.len();
        let removed = (end + n - start) % n;
        let doomed = |i: usize| (1..=removed).contains(&((i + n - start) % n));
        self.locks[start] = None;

        let (points, locks) = self
            .points
            .iter()
            .zip(&self.locks)
            .enumerate()
            .filter(|(i, _)| !doomed(*i))
            .map(|(_, (&p, &l))| (p, l))
            .unzip();
        self.points = points;
        self.locks = locks;
    }
}
