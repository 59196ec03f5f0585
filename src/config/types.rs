//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::legend::DEFAULT_LOGO_SCALE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Legend defaults used when the command line gives no `--label`/`--color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegendConfig {
    /// Entry labels in display order
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// Marker colors, one per label - either a CSS color string or an RGB
    /// array like `[255, 0, 0]`
    #[serde(default = "default_colors")]
    pub colors: Vec<ColorSpec>,

    /// Factor applied to the logo's native pixel size (valid range: 0.01 - 10.0)
    #[serde(default = "default_logo_scale")]
    pub logo_scale: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            colors: default_colors(),
            logo_scale: default_logo_scale(),
        }
    }
}

/// Region names accepted by `--region`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegionConfig {
    /// Exact, case-sensitive region names
    #[serde(default = "default_regions")]
    pub valid: Vec<String>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            valid: default_regions(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub(crate) fn default_labels() -> Vec<String> {
    [
        "Roads",
        "Wire",
        "Meters",
        "Composite Switch MV",
        "Distribution Transformer",
        "Pole Structure",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn default_colors() -> Vec<ColorSpec> {
    ["red", "blue", "black", "green", "purple", "yellow"]
        .iter()
        .map(|&name| ColorSpec::from(name))
        .collect()
}

fn default_logo_scale() -> f64 {
    DEFAULT_LOGO_SCALE
}

pub(crate) fn default_regions() -> Vec<String> {
    [
        "Central",
        "Eastern",
        "Northern",
        "Western",
        "Kampala",
        "Wakiso",
        "Mukono",
        "Mbarara",
        "Gulu",
        "Lira",
        "Jinja",
        "Mbale",
        "Fort Portal",
        "Soroti",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
