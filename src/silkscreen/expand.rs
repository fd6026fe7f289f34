//! Outline expansion: finding the next edge run that must move to clear a
//! pad, and moving it.
//!
//! Edges are scanned in ring order and, for each edge, pads in input order.
//! The first (edge, pad) pair that qualifies wins:
//!
//! 1. the edge passes through the pad's interior,
//! 2. the edge's lock is not perpendicular to the pad direction,
//! 3. the edge has non-zero extent along the pad axis,
//! 4. the run of edges grown around it does not cover the whole ring.
//!
//! The run is then translated along the push axis just far enough that its
//! nearest extreme lands on the pad's far boundary.

use tracing::{debug, trace};

use super::direction::{Direction, Projection};
use super::footprint::Pad;
use super::ring::Ring;
use crate::geometry::Axis;

/// A pending translation of a run of edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expansion {
    /// Edge that triggered the expansion.
    pub edge: usize,
    /// Index of the pad it overlapped.
    pub pad: usize,
    /// First edge of the run (cyclic).
    pub first: usize,
    /// Last edge of the run (cyclic).
    pub last: usize,
    /// Direction the run moves in.
    pub push: Direction,
    /// Signed translation along the push axis.
    pub offset: f64,
}

impl Expansion {
    /// Number of edges in the run for a ring of `len` edges.
    #[must_use]
    pub const fn span_len(&self, len: usize) -> usize {
        (self.last + len - self.first) % len + 1
    }

    /// Axis the run moves along.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.push.axis()
    }

    /// Moves the run and inserts the two bridging corners.
    ///
    /// The ring grows by exactly two points.
    pub fn apply(&self, ring: &mut Ring) {
        ring.translate_span(self.first, self.last, self.axis(), self.offset);
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Backward,
    Forward,
}

/// Finds the first edge run that must move to clear a pad.
///
/// Returns `None` when no edge qualifies against any pad, i.e. the ring is
/// a fixed point of expansion.
#[must_use]
pub fn find_expansion(ring: &Ring, pads: &[Pad]) -> Option<Expansion> {
    let n = ring.len();
    for (edge_index, edge) in ring.edges().enumerate() {
        let lock = ring.lock(edge_index);
        for (pad_index, pad) in pads.iter().enumerate() {
            let rect = pad.rect();
            if !edge.overlaps_interior(&rect) {
                continue;
            }
            if pad.direction.is_perpendicular_to(lock) {
                continue;
            }
            let Some(push) = pad.direction.push_for(&edge) else {
                continue;
            };

            let back = reach(ring, edge_index, pad.direction, Side::Backward);
            let fwd = reach(ring, edge_index, pad.direction, Side::Forward);
            if 1 + back + fwd >= n {
                trace!(
                    edge = edge_index,
                    pad = pad_index,
                    back,
                    fwd,
                    "Span would move the whole ring, skipping"
                );
                continue;
            }

            let axis = push.axis();
            let offset = if push.is_positive() {
                rect.max(axis) - edge.min(axis)
            } else {
                rect.min(axis) - edge.max(axis)
            };
            let expansion = Expansion {
                edge: edge_index,
                pad: pad_index,
                first: ring.backward(edge_index, back),
                last: ring.forward(edge_index, fwd),
                push,
                offset,
            };
            debug!(
                edge = edge_index,
                pad = pad_index,
                first = expansion.first,
                last = expansion.last,
                push = %push,
                offset,
                "Expansion found"
            );
            return Some(expansion);
        }
    }
    None
}

/// How many edges away from `edge_index` the run extends on one side.
///
/// Perpendicular locks and opposite-sign projections end the side.
/// Zero-projection edges are passed over but only count once a same-sign
/// edge beyond them is reached.
fn reach(ring: &Ring, edge_index: usize, pad_direction: Direction, side: Side) -> usize {
    let n = ring.len();
    let axis = pad_direction.axis();
    let reference = ring.edge(edge_index).projection(axis);

    let mut reached = 0;
    for distance in 1..n {
        let index = match side {
            Side::Backward => ring.backward(edge_index, distance),
            Side::Forward => ring.forward(edge_index, distance),
        };
        if pad_direction.is_perpendicular_to(ring.lock(index)) {
            break;
        }
        match Projection::classify(&ring.edge(index), axis, reference) {
            Projection::Zero => {}
            Projection::Along => reached = distance,
            Projection::Against => break,
        }
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    fn square() -> Ring {
        Ring::unlocked(pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])).unwrap()
    }

    fn pad(min_x: f64, min_y: f64, max_x: f64, max_y: f64, direction: Direction) -> Pad {
        Pad::new(Rect::new(min_x, min_y, max_x, max_y), direction)
    }

    #[test]
    fn no_pads_no_expansion() {
        assert_eq!(find_expansion(&square(), &[]), None);
    }

    #[test]
    fn pad_outside_body_needs_nothing() {
        let pads = [pad(6.0, 0.0, 8.0, 2.0, Direction::East)];
        assert_eq!(find_expansion(&square(), &pads), None);
    }

    #[test]
    fn touching_pad_needs_nothing() {
        let pads = [pad(4.0, 1.0, 6.0, 3.0, Direction::East)];
        assert_eq!(find_expansion(&square(), &pads), None);
    }

    #[test]
    fn corner_pad_pushes_right_side_east() {
        let ring = square();
        let pads = [pad(3.0, -1.0, 5.0, 1.0, Direction::South)];
        let expansion = find_expansion(&ring, &pads).unwrap();

        // Bottom edge has no Y extent; the right side is the trigger.
        assert_eq!(expansion.edge, 1);
        assert_eq!((expansion.first, expansion.last), (1, 1));
        assert_eq!(expansion.push, Direction::East);
        assert!((expansion.offset - 1.0).abs() < 1e-12);

        let mut ring = ring;
        expansion.apply(&mut ring);
        assert_eq!(
            ring.points(),
            pts(&[
                (0.0, 0.0),
                (4.0, 0.0),
                (5.0, 0.0),
                (5.0, 4.0),
                (4.0, 4.0),
                (0.0, 4.0)
            ])
            .as_slice()
        );
        assert_eq!(find_expansion(&ring, &pads), None);
    }

    #[test]
    fn perpendicular_lock_blocks_trigger() {
        let ring = Ring::new(
            pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            vec![None, Some(Direction::East), None, None],
        )
        .unwrap();
        let pads = [pad(3.0, -1.0, 5.0, 1.0, Direction::South)];
        assert_eq!(find_expansion(&ring, &pads), None);
    }

    #[test]
    fn parallel_lock_allows_trigger() {
        let ring = Ring::new(
            pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            vec![None, Some(Direction::North), None, None],
        )
        .unwrap();
        let pads = [pad(3.0, -1.0, 5.0, 1.0, Direction::South)];
        assert_eq!(find_expansion(&ring, &pads).map(|e| e.edge), Some(1));
    }

    #[test]
    fn span_grows_over_zero_projection_edges() {
        // Staircase on the right: two north-running edges joined by a short
        // westward step.
        let ring = Ring::unlocked(pts(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (3.5, 2.0),
            (3.5, 4.0),
            (0.0, 4.0),
        ]))
        .unwrap();
        let pads = [pad(3.0, 0.5, 5.0, 1.5, Direction::South)];
        let expansion = find_expansion(&ring, &pads).unwrap();
        assert_eq!(expansion.edge, 1);
        assert_eq!((expansion.first, expansion.last), (1, 3));
        assert_eq!(expansion.span_len(ring.len()), 3);
        // Nearest extreme of the trigger edge sits at x = 4.
        assert!((expansion.offset - 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_projection_ends_the_side() {
        let ring = square();
        let pads = [pad(-1.0, 3.0, 1.0, 5.0, Direction::North)];
        let expansion = find_expansion(&ring, &pads).unwrap();
        // Left side runs south; the right side runs north and stops the
        // scan both ways.
        assert_eq!(expansion.edge, 3);
        assert_eq!((expansion.first, expansion.last), (3, 3));
        assert_eq!(expansion.push, Direction::West);
        assert!((expansion.offset + 1.0).abs() < 1e-12);
    }

    #[test]
    fn span_stops_short_of_the_whole_ring() {
        // Edges 0 and 1 both rise; edge 2 falls and bounds the run.
        let ring = Ring::unlocked(pts(&[(0.0, 0.0), (4.0, 2.0), (0.0, 4.0)])).unwrap();
        let pads = [pad(1.0, 0.0, 3.0, 2.0, Direction::North)];
        let expansion = find_expansion(&ring, &pads).unwrap();
        assert_eq!(expansion.edge, 0);
        assert_eq!((expansion.first, expansion.last), (0, 1));
        assert_eq!(expansion.span_len(ring.len()), 2);
    }
}
