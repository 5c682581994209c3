//! Browser overlay: [`OverlayContext`] over a `CanvasRenderingContext2d`.
//!
//! This module is the only place that touches `web_sys`. Fallible canvas
//! calls are logged and skipped: a guide that fails to draw for one frame
//! is redrawn on the next, and the renderer itself has no failure modes.

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::overlay::{IDENTITY, OverlayContext};

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("2d context unavailable on overlay canvas")]
    ContextUnavailable,
    #[error("canvas call failed: {0}")]
    Js(String),
}

fn log_js_error(op: &'static str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!(op, error = ?e, "overlay: canvas call failed");
    }
}

/// Guide layer backed by a browser canvas element.
pub struct WebOverlay {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    zoom: f64,
    viewport_transform: [f64; 6],
}

impl WebOverlay {
    /// Bind to `canvas`'s 2D context.
    ///
    /// # Errors
    ///
    /// Returns `Js` if the browser rejects the context request and
    /// `ContextUnavailable` if the canvas has no 2D context.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, OverlayError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| OverlayError::Js(format!("{e:?}")))?
            .ok_or(OverlayError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OverlayError::ContextUnavailable)?;
        Ok(Self { canvas: canvas.clone(), ctx, zoom: 1.0, viewport_transform: IDENTITY })
    }
}

impl OverlayContext for WebOverlay {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn viewport_transform(&self) -> [f64; 6] {
        self.viewport_transform
    }

    fn set_view(&mut self, zoom: f64, viewport_transform: [f64; 6]) {
        self.zoom = zoom;
        self.viewport_transform = viewport_transform;
    }

    fn clear(&mut self) {
        log_js_error("reset_transform", self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        let (w, h) = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_transform(&mut self, matrix: [f64; 6]) {
        let [a, b, c, d, e, f] = matrix;
        log_js_error("set_transform", self.ctx.set_transform(a, b, c, d, e, f));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let dash: js_sys::Array = segments.iter().map(|s| JsValue::from_f64(*s)).collect();
        log_js_error("set_line_dash", self.ctx.set_line_dash(&dash));
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
