#![allow(clippy::float_cmp)]

use super::*;
use crate::overlay::{DisplayList, DrawCommand, IDENTITY};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn m(origin: Point, target: Point) -> SnapMatch {
    SnapMatch { origin, target }
}

fn line_widths(list: &DisplayList) -> Vec<f64> {
    list.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::LineWidth(w) => Some(*w),
            _ => None,
        })
        .collect()
}

// =============================================================
// Empty input
// =============================================================

#[test]
fn nothing_drawn_without_matches() {
    let mut list = DisplayList::new();
    draw_guides(&mut list, &[], &[], &GuidelineConfig::default());
    assert!(list.commands().is_empty());
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn vertical_guide_is_axis_aligned() {
    let mut list = DisplayList::new();
    let config = GuidelineConfig::default();
    // Origin not yet on target.x; line still runs vertically from the origin.
    draw_guides(&mut list, &[m(pt(149.0, 0.0), pt(150.0, 100.0))], &[], &config);

    let segs = list.segments();
    assert_eq!(segs[0], (pt(149.0, 0.0), pt(149.0, 100.0)));
    // Guide line plus two crosses of two strokes each.
    assert_eq!(segs.len(), 5);
    assert_eq!(list.stroke_count(), 3);
}

#[test]
fn horizontal_guide_is_axis_aligned() {
    let mut list = DisplayList::new();
    draw_guides(&mut list, &[], &[m(pt(0.0, 48.0), pt(300.0, 50.0))], &GuidelineConfig::default());
    assert_eq!(list.segments()[0], (pt(0.0, 48.0), pt(300.0, 48.0)));
}

#[test]
fn crosses_at_origin_and_target() {
    let mut list = DisplayList::new();
    let config = GuidelineConfig { crosshair_size: 2.0, ..GuidelineConfig::default() };
    draw_guides(&mut list, &[m(pt(10.0, 10.0), pt(10.0, 90.0))], &[], &config);

    let segs = list.segments();
    assert!(segs.contains(&(pt(8.0, 8.0), pt(12.0, 12.0))));
    assert!(segs.contains(&(pt(12.0, 8.0), pt(8.0, 12.0))));
    assert!(segs.contains(&(pt(8.0, 88.0), pt(12.0, 92.0))));
}

// =============================================================
// Style and zoom
// =============================================================

#[test]
fn style_applied_inside_save_restore() {
    let mut list = DisplayList::new();
    list.set_view(1.0, [1.0, 0.0, 0.0, 1.0, 30.0, 40.0]);
    let config = GuidelineConfig { color: "blue".into(), line_dash: vec![4.0, 2.0], ..GuidelineConfig::default() };
    draw_guides(&mut list, &[m(pt(0.0, 0.0), pt(0.0, 10.0))], &[], &config);

    let cmds = list.commands();
    assert_eq!(cmds.first(), Some(&DrawCommand::Save));
    assert_eq!(cmds.last(), Some(&DrawCommand::Restore));
    assert!(cmds.contains(&DrawCommand::SetTransform([1.0, 0.0, 0.0, 1.0, 30.0, 40.0])));
    assert!(cmds.contains(&DrawCommand::StrokeStyle("blue".into())));
    assert!(cmds.contains(&DrawCommand::LineDash(vec![4.0, 2.0])));
    // Markers are drawn solid.
    assert!(cmds.contains(&DrawCommand::LineDash(Vec::new())));
}

#[test]
fn sizes_scale_inversely_with_zoom() {
    let mut list = DisplayList::new();
    list.set_view(2.0, [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    let config = GuidelineConfig {
        line_width: 1.0,
        crosshair_size: 2.0,
        line_dash: vec![4.0],
        ..GuidelineConfig::default()
    };
    draw_guides(&mut list, &[m(pt(0.0, 0.0), pt(0.0, 10.0))], &[], &config);

    assert_eq!(line_widths(&list), vec![0.5]);
    assert!(list.commands().contains(&DrawCommand::LineDash(vec![2.0])));
    // Arm of 2px at zoom 2 is 1 world unit.
    assert!(list.segments().contains(&(pt(-1.0, -1.0), pt(1.0, 1.0))));
}

#[test]
fn zero_zoom_falls_back_to_unit_scale() {
    let mut list = DisplayList::new();
    list.set_view(0.0, IDENTITY);
    draw_guides(&mut list, &[m(pt(0.0, 0.0), pt(0.0, 10.0))], &[], &GuidelineConfig::default());
    assert_eq!(line_widths(&list), vec![1.0]);
}

// =============================================================
// Frame independence
// =============================================================

#[test]
fn clear_then_draw_does_not_accumulate() {
    let mut list = DisplayList::new();
    let config = GuidelineConfig::default();
    let vertical = [m(pt(100.0, 0.0), pt(100.0, 200.0))];
    let horizontal = [m(pt(0.0, 50.0), pt(300.0, 50.0))];

    list.clear();
    draw_guides(&mut list, &vertical, &horizontal, &config);
    let first = list.commands().to_vec();

    list.clear();
    draw_guides(&mut list, &vertical, &horizontal, &config);
    assert_eq!(list.commands(), first.as_slice());
}
