//! Chart settings
//!
//! [`ChartConfig`] collects every tunable of the chart in one TOML file:
//!
//! ```toml
//! width = 932.0
//! pad_angle = 0.005
//! min_label_area = 10.0
//! fill_opacity = 0.6
//! font_size = 10.0
//! color_scheme = "hashed"
//! ```
//!
//! Missing keys fall back to their defaults. The layout and render passes
//! each receive the slice of settings they need via [`ChartConfig::layout`]
//! and [`ChartConfig::render`].

use super::ensure_app_data_dir;
use crate::error::{Result, ResultExt, SunburstError};
use crate::layout::{LayoutConfig, DEFAULT_PAD_ANGLE, DEFAULT_WIDTH};
use crate::render::{ColorScheme, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chart config filename inside the app data directory
pub const CHART_CONFIG_FILE: &str = "chart.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Logical canvas width; the chart radius is half of it
    pub width: f64,
    pub pad_angle: f64,
    pub min_label_area: f64,
    pub fill_opacity: f32,
    pub font_size: f32,
    pub color_scheme: ColorScheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            width: DEFAULT_WIDTH,
            pad_angle: DEFAULT_PAD_ANGLE,
            min_label_area: render.min_label_area,
            fill_opacity: render.fill_opacity,
            font_size: render.font_size,
            color_scheme: render.color_scheme,
        }
    }
}

impl ChartConfig {
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            max_radius: self.width / 2.0,
            pad_angle: self.pad_angle,
        }
    }

    pub fn render(&self) -> RenderConfig {
        RenderConfig {
            min_label_area: self.min_label_area,
            fill_opacity: self.fill_opacity.clamp(0.0, 1.0),
            font_size: self.font_size,
            color_scheme: self.color_scheme,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SunburstError::Config(format!("Failed to parse chart config: {}", e)))?;
        config.layout().validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(SunburstError::from)
            .context(format!("Failed to read chart config {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load `chart.toml` from the app data directory, defaulting when absent
    /// or invalid.
    pub fn load_or_default() -> Self {
        let Some(path) = super::app_data_dir().map(|d| d.join(CHART_CONFIG_FILE)) else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load chart config, using defaults: {}", e);
            Self::default()
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SunburstError::Config(format!("Failed to serialize chart config: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| SunburstError::Config(format!("Failed to write chart config: {}", e)))
    }

    /// Save to `chart.toml` in the app data directory
    pub fn save_default_location(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save(dir.join(CHART_CONFIG_FILE))
    }
}
