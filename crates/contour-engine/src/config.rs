//! Configuration for contour extraction.

use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};
use crate::grid::Grid;
use crate::levels::generate_contour_levels;

/// Extraction settings, loadable from JSON or the environment.
///
/// Levels are either listed explicitly or generated by stepping `interval`
/// over `[min_value, max_value]`, falling back to the data range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Explicit contour levels. Takes precedence over `interval`.
    pub levels: Option<Vec<f64>>,
    /// Spacing of generated levels.
    pub interval: Option<f64>,
    /// Lower bound for generated levels (default: data minimum).
    pub min_value: Option<f64>,
    /// Upper bound for generated levels (default: data maximum).
    pub max_value: Option<f64>,
    /// Output coordinate space width.
    pub width: f64,
    /// Output coordinate space height.
    pub height: f64,
    /// Process levels concurrently.
    pub parallel: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            levels: None,
            interval: None,
            min_value: None,
            max_value: None,
            width: 1.0,
            height: 1.0,
            parallel: true,
        }
    }
}

impl ContourConfig {
    /// Load configuration from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Override fields from `CONTOUR_*` environment variables.
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(val) = std::env::var("CONTOUR_LEVELS") {
            self.levels = Some(parse_levels(&val)?);
        }

        if let Ok(val) = std::env::var("CONTOUR_INTERVAL") {
            self.interval = Some(parse_number("CONTOUR_INTERVAL", &val)?);
        }

        if let Ok(val) = std::env::var("CONTOUR_MIN_VALUE") {
            self.min_value = Some(parse_number("CONTOUR_MIN_VALUE", &val)?);
        }

        if let Ok(val) = std::env::var("CONTOUR_MAX_VALUE") {
            self.max_value = Some(parse_number("CONTOUR_MAX_VALUE", &val)?);
        }

        if let Ok(val) = std::env::var("CONTOUR_WIDTH") {
            self.width = parse_number("CONTOUR_WIDTH", &val)?;
        }

        if let Ok(val) = std::env::var("CONTOUR_HEIGHT") {
            self.height = parse_number("CONTOUR_HEIGHT", &val)?;
        }

        if let Ok(val) = std::env::var("CONTOUR_PARALLEL") {
            self.parallel = val.to_lowercase() == "true" || val == "1";
        }

        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ContourError::config("width must be finite and > 0"));
        }

        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ContourError::config("height must be finite and > 0"));
        }

        match (&self.levels, self.interval) {
            (Some(levels), _) => {
                if let Some(&bad) = levels.iter().find(|l| !l.is_finite()) {
                    return Err(ContourError::InvalidLevel(bad));
                }
            }
            (None, Some(interval)) => {
                if !(interval.is_finite() && interval > 0.0) {
                    return Err(ContourError::config("interval must be finite and > 0"));
                }
            }
            (None, None) => {
                return Err(ContourError::config("either levels or interval is required"));
            }
        }

        Ok(())
    }

    /// Levels to extract for `grid`.
    ///
    /// Explicit levels are returned as given. Generated levels use the
    /// configured bounds, or the grid's finite data range; a grid with no
    /// finite samples needs both bounds configured.
    pub fn resolve_levels(&self, grid: &Grid) -> Result<Vec<f64>> {
        self.validate()?;

        if let Some(ref levels) = self.levels {
            return Ok(levels.clone());
        }

        let interval = self
            .interval
            .ok_or_else(|| ContourError::config("either levels or interval is required"))?;
        let (min, max) = match (self.min_value, self.max_value) {
            (Some(min), Some(max)) => (min, max),
            (min_value, max_value) => {
                let (data_min, data_max) = grid.min_max().ok_or_else(|| {
                    ContourError::config(
                        "grid has no finite samples; set min_value and max_value",
                    )
                })?;
                (min_value.unwrap_or(data_min), max_value.unwrap_or(data_max))
            }
        };

        Ok(generate_contour_levels(min, max, interval))
    }
}

fn parse_number(name: &str, val: &str) -> Result<f64> {
    val.trim()
        .parse()
        .map_err(|_| ContourError::config(format!("{name}: invalid number '{val}'")))
}

/// Parse a comma-separated level list such as `"0, 2.5, 5"`.
pub fn parse_levels(val: &str) -> Result<Vec<f64>> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_number("levels", s))
        .collect()
}
