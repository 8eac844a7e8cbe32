//! View configuration.

use crate::error::{Result, ViewError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_debounce_ms() -> u64 {
    200
}

fn default_entry_height_px() -> u32 {
    22
}

fn default_char_width_px() -> f64 {
    9.0
}

fn default_ellipsis_head() -> usize {
    sv_common::format::DEFAULT_ELLIPSIS_HEAD
}

fn default_container_width_px() -> f64 {
    720.0
}

fn default_viewport_margin_pct() -> f64 {
    1.0
}

fn default_timeline_length_px() -> f64 {
    160.0
}

fn default_timeline_min_segment_px() -> f64 {
    3.0
}

/// Tunables of the view-state layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Quiet window before an edited search query is applied.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Height of an entry, rendered or not.
    #[serde(default = "default_entry_height_px")]
    pub entry_height_px: u32,
    /// Approximate width of one identifier character.
    #[serde(default = "default_char_width_px")]
    pub char_width_px: f64,
    /// Leading characters kept when an identifier is truncated.
    #[serde(default = "default_ellipsis_head")]
    pub ellipsis_head: usize,
    /// Width of the explorer list; drives the identifier budget.
    #[serde(default = "default_container_width_px")]
    pub container_width_px: f64,
    /// Growth of the explorer viewport, in percent, when deciding whether
    /// an entry is on screen.
    #[serde(default = "default_viewport_margin_pct")]
    pub viewport_margin_pct: f64,
    /// Length of a task timeline bar.
    #[serde(default = "default_timeline_length_px")]
    pub timeline_length_px: f64,
    /// Narrowest active segment of a task timeline bar.
    #[serde(default = "default_timeline_min_segment_px")]
    pub timeline_min_segment_px: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            entry_height_px: default_entry_height_px(),
            char_width_px: default_char_width_px(),
            ellipsis_head: default_ellipsis_head(),
            container_width_px: default_container_width_px(),
            viewport_margin_pct: default_viewport_margin_pct(),
            timeline_length_px: default_timeline_length_px(),
            timeline_min_segment_px: default_timeline_min_segment_px(),
        }
    }
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_container_width_px(mut self, px: f64) -> Self {
        self.container_width_px = px;
        self
    }

    pub fn with_entry_height_px(mut self, px: u32) -> Self {
        self.entry_height_px = px;
        self
    }

    pub fn with_viewport_margin_pct(mut self, pct: f64) -> Self {
        self.viewport_margin_pct = pct;
        self
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Characters of identifier that fit in `width_px`.
    pub fn char_budget(&self, width_px: f64) -> usize {
        if self.char_width_px <= 0.0 || width_px <= 0.0 {
            return 0;
        }
        (width_px / self.char_width_px).floor() as usize
    }

    /// Reject configurations that would make the views degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.entry_height_px == 0 {
            return Err(ViewError::InvalidConfig(
                "entry_height_px must be positive".to_string(),
            ));
        }
        if !(self.char_width_px > 0.0) {
            return Err(ViewError::InvalidConfig(format!(
                "char_width_px must be positive, got {}",
                self.char_width_px
            )));
        }
        if !(self.container_width_px > 0.0) {
            return Err(ViewError::InvalidConfig(format!(
                "container_width_px must be positive, got {}",
                self.container_width_px
            )));
        }
        if !(self.viewport_margin_pct >= 0.0) {
            return Err(ViewError::InvalidConfig(format!(
                "viewport_margin_pct must not be negative, got {}",
                self.viewport_margin_pct
            )));
        }
        if !(self.timeline_length_px > self.timeline_min_segment_px)
            || self.timeline_min_segment_px < 0.0
        {
            return Err(ViewError::InvalidConfig(format!(
                "timeline length {} must exceed its minimum segment {}",
                self.timeline_length_px, self.timeline_min_segment_px
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.debounce_window(), Duration::from_millis(200));
        assert_eq!(config.entry_height_px, 22);
        assert_eq!(config.char_budget(90.0), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ViewConfig::from_json(r#"{"debounce_ms": 50}"#).unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.timeline_length_px, 160.0);
    }

    #[test]
    fn test_validate_rejects_degenerate_sizes() {
        assert!(ViewConfig::new().with_entry_height_px(0).validate().is_err());
        assert!(ViewConfig::new()
            .with_container_width_px(0.0)
            .validate()
            .is_err());
        let mut config = ViewConfig::new();
        config.timeline_min_segment_px = 200.0;
        assert!(config.validate().is_err());
        assert!(ViewConfig::new()
            .with_viewport_margin_pct(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = ViewConfig::new().with_debounce_ms(10);
        let parsed = ViewConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
