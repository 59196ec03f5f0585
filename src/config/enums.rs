//! Configuration enum types.

use crate::draw::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a CSS color string or RGB values.
///
/// # Examples
/// ```toml
/// # Named or hex color
/// colors = ["red", "#00ff00"]
///
/// # Custom RGB color (0-255 per component)
/// colors = [[255, 128, 0]]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// CSS color: a name (`purple`), hex (`#800080`) or `rgb(...)` notation
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// RGB arrays are converted from 0-255 range to 0.0-1.0 range with full
    /// opacity. Strings go through the CSS color parser.
    pub fn to_color(&self) -> Result<Color, csscolorparser::ParseColorError> {
        match self {
            ColorSpec::Name(name) => name.trim().parse(),
            ColorSpec::Rgb([r, g, b]) => Ok(Color::new(
                *r as f64 / 255.0,
                *g as f64 / 255.0,
                *b as f64 / 255.0,
                1.0,
            )),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, RED};

    #[test]
    fn names_and_arrays_resolve() {
        assert_eq!(ColorSpec::from("red").to_color().unwrap(), RED);
        assert_eq!(ColorSpec::from(" blue ").to_color().unwrap(), BLUE);
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color().unwrap(), RED);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(ColorSpec::from("not-a-color").to_color().is_err());
    }

    #[test]
    fn deserializes_both_forms() {
        #[derive(Deserialize)]
        struct Holder {
            colors: Vec<ColorSpec>,
        }

        let holder: Holder = toml::from_str(r##"colors = ["green", [0, 0, 255]]"##).unwrap();
        assert_eq!(
            holder.colors,
            vec![ColorSpec::from("green"), ColorSpec::Rgb([0, 0, 255])]
        );
    }
}
