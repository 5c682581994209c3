#![allow(clippy::float_cmp)]

use super::*;
use crate::anchor::build_point_map;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn rect_corners(x: f64, y: f64, w: f64, h: f64) -> Corners {
    Corners::from_array([pt(x, y), pt(x + w, y), pt(x + w, y + h), pt(x, y + h)])
}

fn rect_map(x: f64, y: f64, w: f64, h: f64) -> PointMap {
    build_point_map(&rect_corners(x, y, w, h))
}

// =============================================================
// move_check_points / candidate_points
// =============================================================

#[test]
fn check_points_are_corners_and_center() {
    let pts = move_check_points(&rect_corners(0.0, 0.0, 100.0, 50.0));
    assert_eq!(pts, [pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 50.0), pt(0.0, 50.0), pt(50.0, 25.0)]);
}

#[test]
fn candidate_points_flatten_every_map() {
    let pool = [rect_map(0.0, 0.0, 10.0, 10.0), rect_map(50.0, 50.0, 10.0, 10.0)];
    let pts = candidate_points(&pool);
    assert_eq!(pts.len(), 16);
    assert!(pts.contains(&pt(55.0, 50.0)));
}

// =============================================================
// Margin
// =============================================================

#[test]
fn margin_boundary_is_inclusive() {
    let origin = [pt(100.0, 0.0)];
    let at = collect_axis(&origin, &[pt(105.0, 500.0)], Axis::X, 5.0);
    assert_eq!(at, vec![SnapMatch { origin: pt(100.0, 0.0), target: pt(105.0, 500.0) }]);

    let past = collect_axis(&origin, &[pt(106.0, 500.0)], Axis::X, 5.0);
    assert!(past.is_empty());
}

#[test]
fn zero_margin_only_snaps_exact() {
    let origin = [pt(100.0, 0.0)];
    assert!(collect_axis(&origin, &[pt(100.5, 0.0)], Axis::X, 0.0).is_empty());
    assert_eq!(collect_axis(&origin, &[pt(100.0, 9.0)], Axis::X, 0.0).len(), 1);
}

#[test]
fn empty_pool_yields_nothing() {
    let checks = move_check_points(&rect_corners(0.0, 0.0, 10.0, 10.0));
    let result = collect_snap_matches(&checks, &[], 100.0);
    assert!(result.is_empty());
}

#[test]
fn nan_margin_yields_nothing() {
    let origin = [pt(0.0, 0.0)];
    assert!(collect_axis(&origin, &[pt(0.0, 0.0)], Axis::X, f64::NAN).is_empty());
}

// =============================================================
// Ties
// =============================================================

#[test]
fn ties_produce_cross_product() {
    // Two check points both 2 units left of two candidates sharing x=12.
    let checks = [pt(10.0, 0.0), pt(10.0, 100.0), pt(50.0, 50.0)];
    let candidates = [pt(12.0, 5.0), pt(12.0, 80.0), pt(30.0, 0.0)];
    let matches = collect_axis(&checks, &candidates, Axis::X, 5.0);
    assert_eq!(matches.len(), 4);
    for m in &matches {
        assert_eq!(m.origin.x, 10.0);
        assert_eq!(m.target.x, 12.0);
    }
}

#[test]
fn only_check_points_at_global_minimum_contribute() {
    let checks = [pt(0.0, 0.0), pt(100.0, 0.0)];
    let candidates = [pt(3.0, 0.0), pt(101.0, 0.0)];
    let matches = collect_axis(&checks, &candidates, Axis::X, 5.0);
    assert_eq!(matches, vec![SnapMatch { origin: pt(100.0, 0.0), target: pt(101.0, 0.0) }]);
}

// =============================================================
// Axes
// =============================================================

#[test]
fn axes_are_independent() {
    let moving = move_check_points(&rect_corners(0.0, 0.0, 100.0, 100.0));
    // Far away in x, aligned in y.
    let pool = [rect_map(500.0, 2.0, 100.0, 100.0)];
    let result = collect_snap_matches(&moving, &pool, 5.0);
    assert!(result.vertical.is_empty());
    assert!(!result.horizontal.is_empty());
    assert!(result.horizontal.iter().all(|m| m.delta(Axis::Y) == 2.0));
}

#[test]
fn approaching_neighbour_snaps_once_within_margin() {
    let b = [rect_map(150.0, 0.0, 100.0, 100.0)];

    let far = move_check_points(&rect_corners(44.0, 0.0, 100.0, 100.0));
    assert!(collect_snap_matches(&far, &b, 5.0).vertical.is_empty());

    let near = move_check_points(&rect_corners(49.0, 0.0, 100.0, 100.0));
    let vertical = collect_snap_matches(&near, &b, 5.0).vertical;
    assert!(!vertical.is_empty());
    assert!(vertical.iter().all(|m| m.target.x == 150.0 && m.origin.x == 149.0));
}

#[test]
fn repeated_calls_are_stateless() {
    let moving = move_check_points(&rect_corners(0.0, 0.0, 40.0, 40.0));
    let pool = [rect_map(42.0, 0.0, 40.0, 40.0)];
    let first = collect_snap_matches(&moving, &pool, 5.0);
    let second = collect_snap_matches(&moving, &pool, 5.0);
    assert_eq!(first, second);
}

// =============================================================
// snap_offset / SnapMatch
// =============================================================

#[test]
fn snap_offset_uses_first_match() {
    let matches = [
        SnapMatch { origin: pt(10.0, 0.0), target: pt(12.0, 0.0) },
        SnapMatch { origin: pt(20.0, 0.0), target: pt(18.0, 0.0) },
    ];
    assert_eq!(snap_offset(&matches, Axis::X), 2.0);
    assert_eq!(snap_offset(&[], Axis::X), 0.0);
}
