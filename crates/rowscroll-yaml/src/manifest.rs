//! Manifest types and loading.

use crate::error::ParseError;
use rowscroll_core::{Color, Dataset, PreviewGeometry, RowMetrics, RowRecord, Theme};
use serde::{Deserialize, Serialize};

/// Manifest format version this crate reads.
pub const SUPPORTED_VERSION: &str = "0.1";

const BUILTIN: &str = include_str!("../assets/films.yaml");

/// Row list manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version
    pub rowscroll: String,
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,
    /// Theme colors
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Row and preview geometry
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Rows, in display order
    pub rows: Vec<RowRecord>,
}

fn default_title() -> String {
    "concept for scroll row".to_string()
}

/// Theme colors as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Page background
    pub background: String,
    /// Expansion panel background
    pub panel: String,
    /// Text color
    pub text: String,
    /// Mute button background
    pub button_background: String,
    /// Mute button label
    pub button_text: String,
    /// Row separator (alpha allowed)
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#5a95ff".to_string(),
            panel: "#1C2541".to_string(),
            text: "#ffffff".to_string(),
            button_background: "#ffffff".to_string(),
            button_text: "#1C2541".to_string(),
            border: "#ffffff80".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Parse every color.
    pub fn resolve(&self) -> Result<Theme, ParseError> {
        let color = |field: &str, value: &str| {
            Color::from_hex(value).map_err(|source| ParseError::Color {
                field: format!("theme.{field}"),
                source,
            })
        };
        Ok(Theme {
            background: color("background", &self.background)?,
            panel: color("panel", &self.panel)?,
            text: color("text", &self.text)?,
            button_background: color("button_background", &self.button_background)?,
            button_text: color("button_text", &self.button_text)?,
            border: color("border", &self.border)?,
        })
    }
}

/// Geometry section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Row heights
    pub rows: RowMetrics,
    /// Preview panel size and placement
    pub preview: PreviewGeometry,
}

impl LayoutConfig {
    fn validate(&self) -> Result<(), ParseError> {
        let rows = &self.rows;
        if !rows.is_ordered() {
            return Err(ParseError::invalid(
                "layout.rows",
                format!(
                    "expected 0 < base < expanded < hover, got base={} expanded={} hover={}",
                    rows.base, rows.expanded, rows.hover
                ),
            ));
        }

        let preview = &self.preview;
        for (field, value) in [
            ("layout.preview.width", preview.width),
            ("layout.preview.height", preview.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParseError::invalid(field, "must be positive"));
            }
        }
        for (field, value) in [
            ("layout.preview.offset", preview.offset),
            ("layout.preview.margin", preview.margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ParseError::invalid(field, "must not be negative"));
            }
        }
        Ok(())
    }
}

/// A validated manifest, ready to build the view from.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Page title
    pub title: String,
    /// Parsed theme
    pub theme: Theme,
    /// Row heights
    pub metrics: RowMetrics,
    /// Preview panel geometry
    pub preview: PreviewGeometry,
    /// Validated rows with resolved media
    pub dataset: Dataset,
}

impl Manifest {
    /// Parse a manifest from YAML (no validation).
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or misses `rowscroll`/`rows`.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// The manifest shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only if the embedded asset is broken.
    pub fn builtin() -> Result<Self, ParseError> {
        Self::from_yaml(BUILTIN)
    }

    /// Check version and layout values.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.rowscroll.trim() != SUPPORTED_VERSION {
            return Err(ParseError::UnsupportedVersion(self.rowscroll.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(ParseError::invalid("title", "must not be blank"));
        }
        self.layout.validate()
    }

    /// Validate everything and build the view configuration.
    pub fn into_config(self) -> Result<Config, ParseError> {
        self.validate()?;
        let theme = self.theme.resolve()?;
        let dataset = Dataset::new(self.rows)?;
        tracing::info!(rows = dataset.len(), title = %self.title, "manifest loaded");
        Ok(Config {
            title: self.title,
            theme,
            metrics: self.layout.rows,
            preview: self.layout.preview,
            dataset,
        })
    }

    /// Parse and validate in one step.
    pub fn load(yaml: &str) -> Result<Config, ParseError> {
        Self::from_yaml(yaml)?.into_config()
    }
}
