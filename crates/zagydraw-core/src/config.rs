//! Tunable constants for the editor core.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Grid cell size in world units.
pub const GRID_SIZE: f64 = 10.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid step used when snapping shape endpoints.
    pub grid_size: f64,
    /// Distance (in pixels) within which a line or stroke counts as hit.
    pub hit_tolerance: f64,
    /// Rectangles smaller than this on either axis are discarded.
    pub min_rect_size: f64,
    /// Lowest zoom level.
    pub min_zoom: u32,
    /// Highest zoom level.
    pub max_zoom: u32,
    /// Zoom change per wheel notch.
    pub zoom_step: u32,
    /// Zoom level of a fresh viewport.
    pub default_zoom: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            hit_tolerance: 5.0,
            min_rect_size: 10.0,
            min_zoom: 24,
            max_zoom: 96,
            zoom_step: 12,
            default_zoom: 48,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file from disk.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be finite and positive, got {}",
                self.grid_size
            )));
        }
        if !self.hit_tolerance.is_finite() || self.hit_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hit_tolerance must be finite and not negative, got {}",
                self.hit_tolerance
            )));
        }
        if !self.min_rect_size.is_finite() || self.min_rect_size < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_rect_size must be finite and not negative, got {}",
                self.min_rect_size
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.default_zoom) {
            return Err(ConfigError::Invalid(format!(
                "default_zoom {} outside {}..={}",
                self.default_zoom, self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}
