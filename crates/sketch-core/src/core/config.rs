//! Drawing settings and their TOML loader.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading drawing settings from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunable constants for bond rendering and layout.
///
/// All fractions are relative to `standard_bond_length`, so a sketch drawn
/// at any scale keeps the same proportions. Missing keys in the settings
/// file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Preferred bond length in model units, also the fallback mean bond
    /// length for an empty sketch.
    pub standard_bond_length: f64,
    /// Separation between the lines of a multiple bond, as a fraction of
    /// the standard bond length.
    pub multiple_bond_offset_fraction: f64,
    /// Width of the wide end of a wedge, as a fraction of the standard
    /// bond length.
    pub wedge_width_fraction: f64,
    /// Half-period of a wavy bond, as a fraction of the standard bond
    /// length.
    pub wavy_half_period_fraction: f64,
    /// On/off lengths, in model units, used to stroke dashed lines.
    pub dash_pattern: Vec<f64>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            standard_bond_length: 20.0,
            multiple_bond_offset_fraction: 0.2,
            wedge_width_fraction: 0.15,
            wavy_half_period_fraction: 0.1,
            dash_pattern: vec![2.0, 2.0],
        }
    }
}

impl DrawingConfig {
    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: DrawingConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
