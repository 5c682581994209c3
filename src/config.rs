//! Configuration for the guideline orchestrator and the edit history.
//!
//! DESIGN
//! ======
//! Both configs deserialize with `#[serde(default)]`, so a host may pass a
//! partial JSON object and get the documented defaults for everything else.
//! `from_json` parses and validates in one step; hosts that build a config
//! in code call `validate` themselves.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CROSSHAIR_PX, DEFAULT_GUIDE_COLOR, DEFAULT_HISTORY_LEN, DEFAULT_LINE_WIDTH_PX, DEFAULT_MARGIN_PX,
};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid margin: {0} (must be finite and >= 0)")]
    InvalidMargin(f64),
    #[error("invalid line width: {0} (must be finite and > 0)")]
    InvalidLineWidth(f64),
    #[error("invalid crosshair size: {0} (must be finite and > 0)")]
    InvalidCrosshair(f64),
    #[error("invalid line dash segment: {0} (must be finite and >= 0)")]
    InvalidDash(f64),
    #[error("history max_len must be at least 1")]
    ZeroHistoryLen,
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// GUIDELINES
// =============================================================================

/// Options for [`crate::guidelines::AlignmentGuidelines`].
///
/// Pixel values are in screen space; the orchestrator and renderer divide
/// them by the current zoom.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidelineConfig {
    /// Snap distance in screen pixels.
    pub margin: f64,
    /// Guide stroke color, any CSS color string.
    pub color: String,
    /// Guide line width in screen pixels.
    pub line_width: f64,
    /// Dash pattern in screen pixels; empty for a solid line.
    pub line_dash: Vec<f64>,
    /// Half-size of the "×" marker at each guide end, in screen pixels.
    pub crosshair_size: f64,
    /// Collect and draw vertical guides (X alignment).
    pub vertical: bool,
    /// Collect and draw horizontal guides (Y alignment).
    pub horizontal: bool,
    /// Pull a moving object onto the nearest match.
    pub magnetic: bool,
}

impl Default for GuidelineConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN_PX,
            color: DEFAULT_GUIDE_COLOR.to_owned(),
            line_width: DEFAULT_LINE_WIDTH_PX,
            line_dash: Vec::new(),
            crosshair_size: DEFAULT_CROSSHAIR_PX,
            vertical: true,
            horizontal: true,
            magnetic: true,
        }
    }
}

impl GuidelineConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON and the matching variant for any
    /// value [`GuidelineConfig::validate`] rejects.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every numeric option is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid option found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.margin));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        if !self.crosshair_size.is_finite() || self.crosshair_size <= 0.0 {
            return Err(ConfigError::InvalidCrosshair(self.crosshair_size));
        }
        if let Some(bad) = self.line_dash.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(ConfigError::InvalidDash(*bad));
        }
        Ok(())
    }

    /// Snap margin converted to world units at `zoom`.
    ///
    /// A zoom that is not finite and positive counts as unit scale, as the
    /// guide renderer does.
    #[must_use]
    pub fn world_margin(&self, zoom: f64) -> f64 {
        if zoom.is_finite() && zoom > 0.0 { self.margin / zoom } else { self.margin }
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// Options for [`crate::history::HistoryManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept; the oldest is dropped past this.
    pub max_len: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_len: DEFAULT_HISTORY_LEN }
    }
}

impl HistoryConfig {
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON or `ZeroHistoryLen` for `max_len == 0`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ZeroHistoryLen` when `max_len` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_len == 0 {
            return Err(ConfigError::ZeroHistoryLen);
        }
        Ok(())
    }
}
