//! Removing self-intersections introduced by an expansion.
//!
//! After a run is pushed outward it may cross another part of the ring.
//! A repair deletes the points strictly between two intersecting edges so
//! that the first edge bridges straight to the end of the second. Which way
//! round the deletion goes is decided by the turn between the two edges;
//! a candidate is only accepted if the result is a valid counter-clockwise
//! polygon that still covers everything the ring covered before.

use geo::kernels::Orientation;
use tracing::{debug, trace};

use super::error::{SilkscreenError, SilkscreenResult};
use super::ring::Ring;
use crate::geometry::{orient, segments_intersect, Point, Segment};

/// A pending deletion of points between two intersecting edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repair {
    /// Lower-indexed edge of the intersecting pair.
    pub first_edge: usize,
    /// Higher-indexed edge of the intersecting pair.
    pub second_edge: usize,
    /// Edge kept and unlocked; points after it are deleted.
    pub start: usize,
    /// Last deleted point index.
    pub end: usize,
}

impl Repair {
    /// Deletes points `start + 1 ..= end` (cyclic) and unlocks `start`.
    pub fn apply(&self, ring: &mut Ring) {
        ring.delete_span(self.start, self.end);
    }
}

/// Finds the first acceptable repair for the ring.
///
/// Returns `Ok(None)` if no two non-adjacent edges intersect.
///
/// # Errors
///
/// Returns [`SilkscreenError::InfeasibleRepair`] if intersecting pairs exist
/// but none yields an acceptable deletion.
pub fn find_repair(ring: &Ring) -> SilkscreenResult<Option<Repair>> {
    let n = ring.len();
    let mut unresolved = None;

    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a, b) = (ring.edge(i), ring.edge(j));
            if !segments_intersect(&a, &b) {
                continue;
            }

            // Turn from b's direction to a's, both placed at the origin.
            let turn = orient(Point::default(), direction(&b), direction(&a));
            let candidates: &[(usize, usize)] = match turn {
                Orientation::CounterClockwise => &[(i, j)],
                Orientation::Clockwise => &[(j, i)],
                Orientation::Collinear => &[(i, j), (j, i)],
            };

            for &(start, end) in candidates {
                let mut candidate = ring.clone();
                candidate.delete_span(start, end);
                if is_acceptable(&candidate, ring) {
                    debug!(
                        first_edge = i,
                        second_edge = j,
                        start,
                        end,
                        "Repair found"
                    );
                    return Ok(Some(Repair {
                        first_edge: i,
                        second_edge: j,
                        start,
                        end,
                    }));
                }
                trace!(
                    first_edge = i,
                    second_edge = j,
                    start,
                    end,
                    "Repair candidate rejected"
                );
            }
            unresolved.get_or_insert((i, j));
        }
    }

    match unresolved {
        Some((i, j)) => Err(SilkscreenError::infeasible_repair(format!(
            "edges {i} and {j} intersect and no deletion between them leaves a valid outline"
        ))),
        None => Ok(None),
    }
}

fn direction(edge: &Segment) -> Point {
    Point::new(edge.end.x - edge.start.x, edge.end.y - edge.start.y)
}

fn is_acceptable(candidate: &Ring, before: &Ring) -> bool {
    candidate.len() >= 3
        && candidate.is_valid()
        && candidate.signed_area() > 0.0
        && candidate.covers(before)
}
