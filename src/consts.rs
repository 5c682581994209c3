//! Shared numeric constants for the guides crate.

// ── Snapping ────────────────────────────────────────────────────

/// Default snap margin in screen pixels. Divided by the zoom before use.
pub const DEFAULT_MARGIN_PX: f64 = 4.0;

/// World-space tolerance for a handle still sitting on a guide after a later axis moved it.
pub const ALIGN_EPSILON: f64 = 1e-6;

// ── Guide drawing ───────────────────────────────────────────────

/// Default guide stroke color.
pub const DEFAULT_GUIDE_COLOR: &str = "rgba(255,0,0,0.9)";

/// Default guide line width in screen pixels.
pub const DEFAULT_LINE_WIDTH_PX: f64 = 1.0;

/// Default half-size of the "×" marker drawn at each end of a guide, in screen pixels.
pub const DEFAULT_CROSSHAIR_PX: f64 = 2.4;

// ── History ─────────────────────────────────────────────────────

/// Default maximum number of snapshots kept per editable surface.
pub const DEFAULT_HISTORY_LEN: usize = 50;

// ── Camera ──────────────────────────────────────────────────────

/// Smallest zoom factor the camera accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor the camera accepts.
pub const MAX_ZOOM: f64 = 10.0;
