//! Plot settings applied to every new view
//!
//! Stored as TOML so the scale factors can be tuned by hand.
//!
//! # Mapping
//!
//! A view places samples in time order. The first sample sits at x = 0; every
//! later sample is `elapsed_seconds / time_scale_seconds * zoom` to the right.
//! The vertical position is `value * value_scale * zoom` from the center line.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{app_data_dir, ensure_app_data_dir, PLOT_SETTINGS_FILE};
use crate::error::{Result, SignalError};

/// Multiplicative zoom step for the zoom in/out buttons
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Pixels per unit of sample value
pub const DEFAULT_VALUE_SCALE: f64 = 15.0;

/// Seconds of elapsed time per horizontal pixel
pub const DEFAULT_TIME_SCALE_SECONDS: f64 = 100_000.0;

/// Plot settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Factor applied per zoom in/out click
    pub zoom_step: f64,

    /// Vertical pixels per unit of value
    pub value_scale: f64,

    /// Seconds of elapsed time per horizontal pixel
    pub time_scale_seconds: f64,

    /// Marker size in pixels
    pub point_size: f32,

    /// Line width in pixels
    pub line_width: f32,

    /// Draw the plot axes
    pub show_axes: bool,

    /// Seed new documents with demo samples
    pub seed_new_documents: bool,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            value_scale: DEFAULT_VALUE_SCALE,
            time_scale_seconds: DEFAULT_TIME_SCALE_SECONDS,
            point_size: 3.0,
            line_width: 1.5,
            show_axes: true,
            seed_new_documents: false,
        }
    }
}

impl PlotSettings {
    /// Load settings from a TOML file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SignalError::Config(format!("Failed to read plot settings: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SignalError::Config(format!("Failed to parse plot settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the app data directory, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = app_data_dir().map(|d| d.join(PLOT_SETTINGS_FILE)) else {
            return Self::default();
        };

        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load plot settings, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save settings to the app data directory
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(PLOT_SETTINGS_FILE))
    }

    /// Save settings to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SignalError::Config(format!("Failed to serialize plot settings: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SignalError::Config(format!("Failed to write plot settings: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("zoom_step", self.zoom_step),
            ("value_scale", self.value_scale),
            ("time_scale_seconds", self.time_scale_seconds),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SignalError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.zoom_step <= 1.0 {
            return Err(SignalError::Config(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }
}
