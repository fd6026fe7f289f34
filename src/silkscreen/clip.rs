//! Turning an expanded ring into silkscreen strokes.
//!
//! Each edge has every pad it passes through cut out of it; the surviving
//! pieces are then joined back into maximal polylines.

use super::footprint::Pad;
use super::ring::Ring;
use crate::geometry::{merge_segments, Polyline, Segment};

/// Removes pad coverage from every edge of the ring.
///
/// Pads an edge merely touches leave it intact. Remnants are returned in
/// ring order, each keeping its edge's direction.
#[must_use]
pub fn clip_ring(ring: &Ring, pads: &[Pad]) -> Vec<Segment> {
    let mut remnants = Vec::with_capacity(ring.len());
    for edge in ring.edges() {
        let mut pieces = vec![edge];
        for pad in pads {
            let rect = pad.rect();
            pieces = pieces
                .into_iter()
                .flat_map(|piece| piece.difference(&rect))
                .collect();
            if pieces.is_empty() {
                break;
            }
        }
        remnants.extend(pieces);
    }
    remnants
}

/// Clips the ring against the pads and merges the remnants into polylines.
#[must_use]
pub fn cut(ring: &Ring, pads: &[Pad]) -> Vec<Polyline> {
    merge_segments(&clip_ring(ring, pads))
}
