//! End-to-end silkscreen generation on small hand-checked footprints.
//!
//! Each scenario runs the full pipeline (validation, expansion, repair and
//! clipping) and compares the outline and strokes against coordinates
//! worked out by hand.

use silkscreen_mcp::geometry::{Point, Polyline, Rect};
use silkscreen_mcp::silkscreen::{
    expand_outline, generate_silkscreen, Direction, Footprint, Pad, SilkscreenError,
    SilkscreenOptions,
};

const EPS: f64 = 1e-9;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

fn pad(min_x: f64, min_y: f64, max_x: f64, max_y: f64, direction: Direction) -> Pad {
    Pad::new(Rect::new(min_x, min_y, max_x, max_y), direction)
}

fn assert_points(actual: &[Point], expected: &[(f64, f64)]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "point count differs: {actual:?}"
    );
    for (i, (a, &(x, y))) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a.x - x).abs() < EPS && (a.y - y).abs() < EPS,
            "point {i}: expected ({x}, {y}), got ({}, {})",
            a.x,
            a.y
        );
    }
}

fn square() -> Vec<Point> {
    pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
}

fn options(max_iterations: usize) -> SilkscreenOptions {
    SilkscreenOptions {
        max_iterations,
        ..SilkscreenOptions::default()
    }
}

// =============================================================================
// Square With Corner Pads
// =============================================================================

#[test]
fn test_square_without_pads_is_unchanged() {
    let footprint = Footprint::new(square(), vec![]);
    let artwork = generate_silkscreen(&footprint, &SilkscreenOptions::default()).unwrap();

    assert_points(
        artwork.ring.points(),
        &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
    );
    assert_eq!(artwork.report.steps(), 0);
    assert_eq!(artwork.polylines.len(), 1);
    assert!(artwork.polylines[0].is_closed());
    assert!((artwork.stroke_length() - 16.0).abs() < EPS);
}

#[test]
fn test_pads_touching_the_outline_change_nothing() {
    let footprint = Footprint::new(
        square(),
        vec![
            pad(4.0, 1.0, 6.0, 3.0, Direction::East),
            pad(1.0, -2.0, 3.0, 0.0, Direction::South),
        ],
    );
    let artwork = generate_silkscreen(&footprint, &SilkscreenOptions::default()).unwrap();

    assert_eq!(artwork.report.steps(), 0);
    assert_points(
        artwork.ring.points(),
        &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
    );
    assert_eq!(artwork.polylines.len(), 1);
    assert!(artwork.polylines[0].is_closed());
    assert!((artwork.stroke_length() - 16.0).abs() < EPS);
}

#[test]
fn test_square_with_one_corner_pad() {
    let footprint = Footprint::new(square(), vec![pad(3.0, -1.0, 5.0, 1.0, Direction::South)]);
    let artwork = generate_silkscreen(&footprint, &SilkscreenOptions::default()).unwrap();

    assert_points(
        artwork.ring.points(),
        &[
            (0.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (5.0, 4.0),
            (4.0, 4.0),
            (0.0, 4.0),
        ],
    );
    assert!((artwork.ring.perimeter() - 18.0).abs() < EPS);
    assert!((artwork.ring.signed_area() - 20.0).abs() < EPS);
    assert_eq!(artwork.report.expansions, 1);
    assert_eq!(artwork.report.repairs, 0);

    assert_eq!(artwork.polylines.len(), 1);
    assert_points(
        &artwork.polylines[0].points,
        &[(5.0, 0.0), (5.0, 4.0), (0.0, 4.0), (0.0, 0.0), (3.0, 0.0)],
    );
    assert!((artwork.stroke_length() - 16.0).abs() < EPS);

    // One unit of the bottom edge and the new corner edge lie in the pad.
    assert!((artwork.ring.perimeter() - artwork.stroke_length() - 2.0).abs() < EPS);
}

#[test]
fn test_clockwise_input_gives_the_same_outline() {
    let clockwise = pts(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]);
    let pads = vec![pad(3.0, -1.0, 5.0, 1.0, Direction::South)];

    let forward = generate_silkscreen(&Footprint::new(square(), pads.clone()), &options(10)).unwrap();
    let reversed = generate_silkscreen(&Footprint::new(clockwise, pads), &options(10)).unwrap();

    assert!(reversed.ring.signed_area() > 0.0);
    assert!((reversed.ring.signed_area() - forward.ring.signed_area()).abs() < EPS);
    assert!((reversed.ring.perimeter() - forward.ring.perimeter()).abs() < EPS);
    assert!((reversed.stroke_length() - forward.stroke_length()).abs() < EPS);
    assert_eq!(reversed.report, forward.report);
}

#[test]
fn test_square_with_opposite_corner_pads() {
    let footprint = Footprint::new(
        square(),
        vec![
            pad(3.0, -1.0, 5.0, 1.0, Direction::South),
            pad(-1.0, 3.0, 1.0, 5.0, Direction::North),
        ],
    );
    let (ring, report) = expand_outline(&footprint, &options(2)).unwrap();

    assert_points(
        ring.points(),
        &[
            (-1.0, 0.0),
            (0.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (5.0, 4.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (-1.0, 4.0),
        ],
    );
    assert_eq!(report.expansions, 2);
    assert_eq!(report.repairs, 0);
}

#[test]
fn test_square_with_pads_on_adjacent_sides() {
    let footprint = Footprint::new(
        square(),
        vec![
            pad(3.0, -1.0, 5.0, 1.0, Direction::South),
            pad(3.0, 3.0, 5.0, 5.0, Direction::East),
        ],
    );
    let artwork = generate_silkscreen(&footprint, &SilkscreenOptions::default()).unwrap();

    assert_points(
        artwork.ring.points(),
        &[
            (0.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (5.0, 4.0),
            (5.0, 5.0),
            (4.0, 5.0),
            (0.0, 5.0),
            (0.0, 4.0),
        ],
    );
    assert_eq!(artwork.report.expansions, 2);
    assert_eq!(artwork.report.repairs, 0);
    assert!(artwork.ring.is_valid());
    assert!((artwork.ring.signed_area() - 25.0).abs() < EPS);
}

#[test]
fn test_cap_below_steps_needed_fails() {
    let footprint = Footprint::new(
        square(),
        vec![
            pad(3.0, -1.0, 5.0, 1.0, Direction::South),
            pad(-1.0, 3.0, 1.0, 5.0, Direction::North),
        ],
    );
    let err = generate_silkscreen(&footprint, &options(1)).unwrap_err();
    assert!(matches!(err, SilkscreenError::NonConvergence { iterations: 1 }));
    assert_eq!(err.kind(), "non_convergence");
}

// =============================================================================
// Slot Closed By A Repair
// =============================================================================

fn slot() -> Footprint {
    Footprint::new(
        pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (6.0, 10.0),
            (6.0, 4.0),
            (4.0, 4.0),
            (4.0, 10.0),
            (0.0, 10.0),
        ]),
        vec![pad(3.0, 8.0, 7.0, 12.0, Direction::North)],
    )
    .with_name("slot")
}

#[test]
fn test_slot_is_closed_by_a_repair() {
    let artwork = generate_silkscreen(&slot(), &SilkscreenOptions::default()).unwrap();

    assert_eq!(artwork.name.as_deref(), Some("slot"));
    assert_points(
        artwork.ring.points(),
        &[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (6.0, 10.0),
            (4.0, 10.0),
            (0.0, 10.0),
        ],
    );
    assert_eq!(artwork.report.expansions, 1);
    assert_eq!(artwork.report.repairs, 1);
    assert!((artwork.ring.signed_area() - 100.0).abs() < EPS);
}

#[test]
fn test_slot_strokes_skip_the_pad() {
    let artwork = generate_silkscreen(&slot(), &SilkscreenOptions::default()).unwrap();

    assert_eq!(artwork.polylines.len(), 1);
    assert_points(
        &artwork.polylines[0].points,
        &[
            (3.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (7.0, 10.0),
        ],
    );
    assert!(!artwork.polylines[0].is_closed());
    assert!((artwork.stroke_length() - 36.0).abs() < EPS);
    assert!((artwork.ring.perimeter() - artwork.stroke_length() - 4.0).abs() < EPS);
}

#[test]
fn test_slot_needs_two_steps() {
    let err = generate_silkscreen(&slot(), &options(1)).unwrap_err();
    assert!(matches!(err, SilkscreenError::NonConvergence { .. }));
    assert!(generate_silkscreen(&slot(), &options(2)).is_ok());
}

// =============================================================================
// Locks
// =============================================================================

#[test]
fn test_perpendicular_lock_keeps_edge_in_place() {
    // An east lock on the right side is perpendicular to the south pad.
    let footprint = Footprint::new(square(), vec![pad(3.0, -1.0, 5.0, 1.0, Direction::South)])
        .with_locks(vec![None, Some(Direction::East), None, None]);
    let artwork = generate_silkscreen(&footprint, &SilkscreenOptions::default()).unwrap();

    assert_eq!(artwork.report.steps(), 0);
    assert_eq!(artwork.ring.len(), 4);

    // The pad still cuts the corner out of the strokes.
    let total: f64 = artwork.polylines.iter().map(Polyline::length).sum();
    assert!((total - 14.0).abs() < EPS);
}

#[test]
fn test_lock_count_mismatch_is_malformed() {
    let footprint = Footprint::new(square(), vec![]).with_locks(vec![None, None]);
    let err = generate_silkscreen(&footprint, &SilkscreenOptions::default()).unwrap_err();
    assert_eq!(err.kind(), "malformed_input");
}
