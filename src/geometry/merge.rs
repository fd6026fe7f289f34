//! Joining connected segments into maximal polylines.
//!
//! Segments are chained where the end of one coincides with the start of
//! another. A node continues a chain only when exactly one segment arrives
//! and exactly one leaves; anything else (a free end or a junction)
//! terminates it. Chains that close on themselves are emitted as closed
//! polylines whose first and last points coincide.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use geo::kernels::Orientation;

use super::segment::Segment;
use super::{orient, Point, SNAP};

/// An open or closed sequence of connected points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
}

impl Polyline {
    /// Creates a polyline from its vertices.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns true if the first and last points coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 2 && first.approx_eq(*last),
            _ => false,
        }
    }

    /// Total length of all pieces.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Iterates over the pieces of the polyline.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }
}

type NodeKey = (i64, i64);

#[allow(clippy::cast_possible_truncation)] // coordinates are far below i64 range at this grid
fn node_key(p: Point) -> NodeKey {
    ((p.x / SNAP).round() as i64, (p.y / SNAP).round() as i64)
}

/// Merges directed segments into maximal polylines.
///
/// Output order follows the input order of each chain's first segment.
/// Interior vertices where the chain continues straight on are dropped.
#[must_use]
pub fn merge_segments(segments: &[Segment]) -> Vec<Polyline> {
    let mut outgoing: HashMap<NodeKey, Vec<usize>> = HashMap::new();
    let mut incoming: HashMap<NodeKey, usize> = HashMap::new();
    for (i, segment) in segments.iter().enumerate() {
        outgoing.entry(node_key(segment.start)).or_default().push(i);
        *incoming.entry(node_key(segment.end)).or_default() += 1;
    }

    let passes_through = |key: &NodeKey| {
        incoming.get(key).copied().unwrap_or(0) == 1
            && outgoing.get(key).map_or(0, Vec::len) == 1
    };

    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    // Open chains first, started at free ends and junctions.
    for i in 0..segments.len() {
        if used[i] || passes_through(&node_key(segments[i].start)) {
            continue;
        }
        polylines.push(follow_chain(segments, i, &mut used, &outgoing, &passes_through));
    }

    // Whatever is left forms closed loops.
    for i in 0..segments.len() {
        if !used[i] {
            polylines.push(follow_chain(segments, i, &mut used, &outgoing, &passes_through));
        }
    }

    polylines
        .into_iter()
        .map(|p| Polyline::new(drop_straight_vertices(p)))
        .collect()
}

fn follow_chain(
    segments: &[Segment],
    first: usize,
    used: &mut [bool],
    outgoing: &HashMap<NodeKey, Vec<usize>>,
    passes_through: &impl Fn(&NodeKey) -> bool,
) -> Vec<Point> {
    used[first] = true;
    let mut points = vec![segments[first].start, segments[first].end];
    let mut current = first;

    loop {
        let key = node_key(segments[current].end);
        if !passes_through(&key) {
            break;
        }
        let Some(&next) = outgoing.get(&key).and_then(|v| v.first()) else {
            break;
        };
        if used[next] {
            break;
        }
        used[next] = true;
        points.push(segments[next].end);
        current = next;
    }
    points
}

fn drop_straight_vertices(points: Vec<Point>) -> Vec<Point> {
    if points.len() < 3 {
        return points;
    }
    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);
    for i in 1..points.len() - 1 {
        let (prev, here, next) = (kept[kept.len() - 1], points[i], points[i + 1]);
        let straight = orient(prev, here, next) == Orientation::Collinear
            && (here.x - prev.x).mul_add(next.x - here.x, (here.y - prev.y) * (next.y - here.y))
                > 0.0;
        if !straight {
            kept.push(here);
        }
    }
    kept.push(points[points.len() - 1]);
    kept
}
