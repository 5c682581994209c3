//! Guide rendering: draws active snap matches onto the overlay layer.
//!
//! This module only issues drawing calls through [`OverlayContext`]. It
//! never clears the layer itself; the orchestrator clears before each render
//! pass and calls [`draw_guides`] after the scene has been drawn.
//!
//! Drawing happens in world space under the viewport transform, so every
//! screen-pixel size (line width, dash, marker) is divided by the zoom.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::GuidelineConfig;
use crate::geom::Point;
use crate::overlay::OverlayContext;
use crate::snap::SnapMatch;

/// Draw vertical and horizontal guides with their end markers.
///
/// A vertical guide runs from the match origin to `(origin.x, target.y)` and
/// a horizontal one to `(target.x, origin.y)`, so lines stay axis-aligned
/// even before the object has settled on the target.
pub fn draw_guides<O>(ctx: &mut O, vertical: &[SnapMatch], horizontal: &[SnapMatch], config: &GuidelineConfig)
where
    O: OverlayContext + ?Sized,
{
    if vertical.is_empty() && horizontal.is_empty() {
        return;
    }

    let zoom = ctx.zoom();
    let inv_zoom = if zoom.is_finite() && zoom > 0.0 { 1.0 / zoom } else { 1.0 };
    let dash: Vec<f64> = config.line_dash.iter().map(|d| d * inv_zoom).collect();
    let arm = config.crosshair_size * inv_zoom;
    let viewport = ctx.viewport_transform();

    ctx.save();
    ctx.set_transform(viewport);
    ctx.set_stroke_style(&config.color);
    ctx.set_line_width(config.line_width * inv_zoom);

    // Layer 1: guide lines, dashed if configured.
    ctx.set_line_dash(&dash);
    for m in vertical {
        draw_line(ctx, m.origin, Point::new(m.origin.x, m.target.y));
    }
    for m in horizontal {
        draw_line(ctx, m.origin, Point::new(m.target.x, m.origin.y));
    }

    // Layer 2: end markers, always solid.
    ctx.set_line_dash(&[]);
    for m in vertical.iter().chain(horizontal) {
        draw_cross(ctx, m.origin, arm);
        draw_cross(ctx, m.target, arm);
    }

    ctx.restore();
}

fn draw_line<O: OverlayContext + ?Sized>(ctx: &mut O, from: Point, to: Point) {
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
}

/// "×" centred on `at`, each arm reaching `arm` units along both axes.
fn draw_cross<O: OverlayContext + ?Sized>(ctx: &mut O, at: Point, arm: f64) {
    ctx.begin_path();
    ctx.move_to(at.x - arm, at.y - arm);
    ctx.line_to(at.x + arm, at.y + arm);
    ctx.move_to(at.x + arm, at.y - arm);
    ctx.line_to(at.x - arm, at.y + arm);
    ctx.stroke();
}
