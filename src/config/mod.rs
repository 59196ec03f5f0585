//! Configuration file support for geolegend.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/geolegend/config.toml`. Settings include the default legend
//! entries, the logo scale, and the list of region names the CLI accepts.
//!
//! If no config file exists, the built-in defaults are used automatically. The render
//! path only reads this file; nothing here writes it.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{LegendConfig, RegionConfig};

use crate::draw::{BLACK, Color};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted range for `legend.logo_scale` and `--logo-scale`.
pub const MIN_LOGO_SCALE: f64 = 0.01;
pub const MAX_LOGO_SCALE: f64 = 10.0;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [legend]
/// labels = ["Roads", "Wire"]
/// colors = ["red", [0, 0, 255]]
/// logo_scale = 0.5
///
/// [regions]
/// valid = ["Central", "Eastern"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Default legend entries and logo scale
    #[serde(default)]
    pub legend: LegendConfig,

    /// Region names accepted on the command line
    #[serde(default)]
    pub regions: RegionConfig,
}

impl Config {
    /// Validates and repairs configuration values.
    ///
    /// Invalid values are clamped or replaced by defaults and a warning is logged:
    /// - `legend.logo_scale`: 0.01 - 10.0
    /// - `legend.colors`: unparsable entries become black
    /// - `legend.labels`/`legend.colors`: empty or mismatched lists fall back to the
    ///   built-in legend
    /// - `regions.valid`: blank names are dropped; an empty list falls back to the
    ///   built-in regions
    fn validate_and_clamp(&mut self) {
        let scale = self.legend.logo_scale;
        if !scale.is_finite() {
            warn!(
                "Invalid logo_scale {}, using {}",
                scale,
                crate::legend::DEFAULT_LOGO_SCALE
            );
            self.legend.logo_scale = crate::legend::DEFAULT_LOGO_SCALE;
        } else if !(MIN_LOGO_SCALE..=MAX_LOGO_SCALE).contains(&scale) {
            warn!(
                "Invalid logo_scale {:.3}, clamping to {}-{} range",
                scale, MIN_LOGO_SCALE, MAX_LOGO_SCALE
            );
            self.legend.logo_scale = scale.clamp(MIN_LOGO_SCALE, MAX_LOGO_SCALE);
        }

        for spec in &mut self.legend.colors {
            if let Err(err) = spec.to_color() {
                warn!("Invalid legend color {:?} ({}), using black", spec, err);
                let [r, g, b, _] = BLACK.to_rgba8();
                *spec = ColorSpec::Rgb([r, g, b]);
            }
        }

        if self.legend.labels.is_empty() || self.legend.labels.len() != self.legend.colors.len() {
            warn!(
                "Legend has {} labels and {} colors, falling back to the built-in legend",
                self.legend.labels.len(),
                self.legend.colors.len()
            );
            self.legend.labels = types::default_labels();
            self.legend.colors = types::default_colors();
        }

        self.regions.valid.retain(|name| {
            let keep = !name.trim().is_empty();
            if !keep {
                warn!("Ignoring blank region name");
            }
            keep
        });
        for name in &mut self.regions.valid {
            *name = name.trim().to_string();
        }
        if self.regions.valid.is_empty() {
            warn!("No valid regions configured, falling back to the built-in list");
            self.regions.valid = types::default_regions();
        }
    }

    /// Resolved default legend colors, index-aligned with `legend.labels`.
    pub fn legend_colors(&self) -> Vec<Color> {
        self.legend
            .colors
            .iter()
            .map(|spec| spec.to_color().unwrap_or(BLACK))
            .collect()
    }

    /// Returns the JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/geolegend/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("geolegend");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and repaired.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}
