//! Report configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use sv_view::ColorMode;

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Follow the stored preference, then the system preference.
    #[default]
    Auto,
}

impl ReportTheme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }

    /// Fixed color mode, if the theme pins one.
    pub fn color_mode(&self) -> Option<ColorMode> {
        match self {
            ReportTheme::Light => Some(ColorMode::Light),
            ReportTheme::Dark => Some(ColorMode::Dark),
            ReportTheme::Auto => None,
        }
    }
}

impl From<ColorMode> for ReportTheme {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => ReportTheme::Light,
            ColorMode::Dark => ReportTheme::Dark,
        }
    }
}

/// Layout sizes of the generated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLayout {
    /// Edge length of a peek strip icon.
    #[serde(default = "default_peek_icon_px")]
    pub peek_icon_px: u32,
    /// Height of the explorer list.
    #[serde(default = "default_explorer_height_px")]
    pub explorer_height_px: u32,
    /// Height of the inline frame in the detail panel.
    #[serde(default = "default_frame_height_px")]
    pub frame_height_px: u32,
}

fn default_peek_icon_px() -> u32 {
    14
}

fn default_explorer_height_px() -> u32 {
    480
}

fn default_frame_height_px() -> u32 {
    360
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            peek_icon_px: default_peek_icon_px(),
            explorer_height_px: default_explorer_height_px(),
            frame_height_px: default_frame_height_px(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Custom report title; the input's test title otherwise.
    pub title: Option<String>,
    /// Color theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Separator between breadcrumb path components.
    #[serde(default = "default_breadcrumb_separator")]
    pub breadcrumb_separator: String,
    /// Minify the output in release builds.
    #[serde(default = "default_true")]
    pub minify: bool,
    /// Embed the report summary as JSON for scripts.
    #[serde(default = "default_true")]
    pub embed_data: bool,
    /// Layout sizes.
    #[serde(default)]
    pub layout: ReportLayout,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_breadcrumb_separator() -> String {
    "〉".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: None,
            theme: ReportTheme::default(),
            breadcrumb_separator: default_breadcrumb_separator(),
            minify: true,
            embed_data: true,
            layout: ReportLayout::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the breadcrumb separator.
    pub fn with_breadcrumb_separator(mut self, separator: impl Into<String>) -> Self {
        self.breadcrumb_separator = separator.into();
        self
    }

    /// Enable or disable minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Reject configurations that would produce a broken page.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != default_schema_version() {
            return Err(ReportError::InvalidConfig(format!(
                "unsupported schema version {}",
                self.schema_version
            )));
        }
        if self.breadcrumb_separator.is_empty() {
            return Err(ReportError::InvalidConfig(
                "breadcrumb separator is empty".to_string(),
            ));
        }
        let layout = &self.layout;
        for (name, value) in [
            ("peek_icon_px", layout.peek_icon_px),
            ("explorer_height_px", layout.explorer_height_px),
            ("frame_height_px", layout.frame_height_px),
        ] {
            if value == 0 {
                return Err(ReportError::InvalidConfig(format!("{name} must be positive")));
            }
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
