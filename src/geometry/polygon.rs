//! Point rings viewed as `geo` polygons.
//!
//! A ring is an ordered slice of points; the closing edge from the last
//! point back to the first is implicit.

use geo::kernels::Orientation;
use geo::{Area, Coord, LineString, Polygon, Relate, Validation, Winding};

use super::segment::Segment;
use super::{orient, Point, TOLERANCE};

/// Iterates over the edges of a ring, including the closing edge.
pub fn edges(points: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    let n = points.len();
    (0..n).map(move |i| Segment::new(points[i], points[(i + 1) % n]))
}

/// The ring as a closed `geo` line string.
#[must_use]
pub fn boundary(points: &[Point]) -> LineString<f64> {
    let mut line: LineString<f64> = points.iter().copied().map(Coord::<f64>::from).collect();
    line.close();
    line
}

/// The ring as a hole-free `geo` polygon, keeping its winding.
#[must_use]
pub fn to_polygon(points: &[Point]) -> Polygon<f64> {
    Polygon::new(boundary(points), vec![])
}

/// Signed area of a ring: positive for counter-clockwise, negative for
/// clockwise.
#[must_use]
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    to_polygon(points).signed_area()
}

/// Returns true if the ring winds counter-clockwise.
#[must_use]
pub fn is_ccw(points: &[Point]) -> bool {
    points.len() >= 3 && boundary(points).is_ccw()
}

/// Returns true if two consecutive edges (`prev.end == next.start`) fold
/// back over each other.
fn folds_back(prev: &Segment, next: &Segment) -> bool {
    if orient(prev.start, prev.end, next.end) != Orientation::Collinear {
        return false;
    }
    let (ax, ay) = (prev.end.x - prev.start.x, prev.end.y - prev.start.y);
    let (bx, by) = (next.end.x - next.start.x, next.end.y - next.start.y);
    ax.mul_add(bx, ay * by) < 0.0
}

/// Returns true if the ring is a simple closed curve: at least three
/// points, no zero-length edges, no spikes, and a boundary that `geo`
/// accepts as a valid polygon exterior.
#[must_use]
pub fn is_simple(points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let segments: Vec<Segment> = edges(points).collect();
    if segments.iter().any(|s| s.length() <= TOLERANCE) {
        return false;
    }
    let n = segments.len();
    if (0..n).any(|i| folds_back(&segments[i], &segments[(i + 1) % n])) {
        return false;
    }
    to_polygon(points).is_valid()
}

/// Returns true if the ring bounds a proper polygon: simple with non-zero
/// area.
#[must_use]
pub fn is_valid(points: &[Point]) -> bool {
    is_simple(points) && signed_area(points).abs() > TOLERANCE
}

/// Returns true if the closed polygon `outer` covers every point of
/// `inner`'s boundary.
///
/// `outer` must be simple; `inner` may self-intersect. For a hole-free
/// `outer` this is the same as covering the whole region bounded by
/// `inner`.
#[must_use]
pub fn covers(outer: &[Point], inner: &[Point]) -> bool {
    to_polygon(outer).relate(&boundary(inner)).is_covers()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    fn square() -> Vec<Point> {
        ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
    }

    #[test]
    fn signed_area_ccw_and_cw() {
        let mut pts = square();
        assert!((signed_area(&pts) - 16.0).abs() < TOLERANCE);
        assert!(is_ccw(&pts));
        pts.reverse();
        assert!((signed_area(&pts) + 16.0).abs() < TOLERANCE);
        assert!(!is_ccw(&pts));
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area(&ring(&[(0.0, 0.0), (1.0, 1.0)])).abs() < TOLERANCE);
        assert!(signed_area(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn boundary_is_closed() {
        let line = boundary(&square());
        assert_eq!(line.0.len(), 5);
        assert!(line.is_closed());
    }

    #[test]
    fn square_is_simple_and_valid() {
        assert!(is_simple(&square()));
        assert!(is_valid(&square()));
    }

    #[test]
    fn collinear_vertices_are_still_simple() {
        let pts = ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (5.0, 4.0),
            (4.0, 4.0),
            (0.0, 4.0),
        ]);
        assert!(is_simple(&pts));
    }

    #[test]
    fn bowtie_is_not_simple() {
        let pts = ring(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)]);
        assert!(!is_simple(&pts));
    }

    #[test]
    fn fold_back_is_not_simple() {
        let pts = ring(&[(0.0, 0.0), (4.0, 0.0), (2.0, 0.0), (2.0, 3.0)]);
        assert!(!is_simple(&pts));
    }

    #[test]
    fn repeated_point_is_not_simple() {
        let pts = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        assert!(!is_simple(&pts));
    }

    #[test]
    fn flat_triangle_is_not_valid() {
        let pts = ring(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0)]);
        assert!(!is_valid(&pts));
    }

    #[test]
    fn micrometre_square_is_simple() {
        let pts = ring(&[(0.0, 0.0), (1e-5, 0.0), (1e-5, 1e-5), (0.0, 1e-5)]);
        assert!(is_simple(&pts));
        assert!(is_ccw(&pts));
    }

    #[test]
    fn larger_polygon_covers_smaller() {
        let big = square();
        let small = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        assert!(covers(&big, &small));
        assert!(!covers(&small, &big));
        assert!(covers(&big, &big));
    }

    #[test]
    fn polygon_does_not_cover_shape_poking_out_of_a_notch() {
        // U shape with the notch open at the top.
        let u = ring(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 6.0),
            (4.0, 6.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 6.0),
            (0.0, 6.0),
        ]);
        // Every vertex lies inside the U, but the top edge spans the notch.
        let bar = ring(&[(1.0, 1.0), (5.0, 1.0), (5.0, 5.0), (1.0, 5.0)]);
        assert!(!covers(&u, &bar));
    }

    #[test]
    fn covers_accepts_self_intersecting_inner_ring_inside_outer() {
        let outer = square();
        let bowtie = ring(&[(1.0, 1.0), (3.0, 3.0), (3.0, 1.0), (1.0, 3.0)]);
        assert!(covers(&outer, &bowtie));
    }
}
