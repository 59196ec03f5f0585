//! Validation of user-supplied region names and bounding-box strings.
//!
//! These checks run before a [`LegendSpec`](crate::legend::LegendSpec) is
//! built; the renderer itself treats the region as an opaque string.

use crate::legend::BoundingBox;
use thiserror::Error;

/// Reasons a command-line value is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Region not specified")]
    MissingRegion,

    #[error("Invalid region '{region}'. Valid regions: {}", valid.join(", "))]
    UnknownRegion { region: String, valid: Vec<String> },

    #[error("Bounding box coordinates not specified")]
    MissingBoundingBox,

    #[error("Invalid bounding box coordinates: {0}")]
    InvalidBoundingBox(String),
}

/// Returns the region if it matches one of `valid` exactly.
pub fn validate_region<'a>(region: &'a str, valid: &[String]) -> Result<&'a str, InputError> {
    let region = region.trim();
    if region.is_empty() {
        return Err(InputError::MissingRegion);
    }
    if valid.iter().any(|name| name == region) {
        Ok(region)
    } else {
        Err(InputError::UnknownRegion {
            region: region.to_string(),
            valid: valid.to_vec(),
        })
    }
}

/// Parses `"xmin, ymin, xmax, ymax"` into a validated [`BoundingBox`].
pub fn parse_bounding_box(text: &str) -> Result<BoundingBox, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::MissingBoundingBox);
    }

    let coords = text
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| InputError::InvalidBoundingBox(format!("'{part}' is not a number")))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let [xmin, ymin, xmax, ymax] = coords[..] else {
        return Err(InputError::InvalidBoundingBox(
            "There must be exactly 4 values.".to_string(),
        ));
    };

    if coords.iter().any(|v| !v.is_finite()) {
        return Err(InputError::InvalidBoundingBox(
            "Values must be finite numbers.".to_string(),
        ));
    }
    if xmin >= xmax || ymin >= ymax {
        return Err(InputError::InvalidBoundingBox(
            "Max values cannot be lower than or equal to min values.".to_string(),
        ));
    }
    Ok(BoundingBox::new(xmin, ymin, xmax, ymax))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Vec<String> {
        ["Central", "Eastern", "Fort Portal"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn known_regions_pass_after_trimming() {
        assert_eq!(validate_region(" Fort Portal ", &regions()), Ok("Fort Portal"));
        assert_eq!(validate_region("Central", &regions()), Ok("Central"));
    }

    #[test]
    fn region_match_is_case_sensitive() {
        let err = validate_region("central", &regions()).unwrap_err();
        assert!(matches!(err, InputError::UnknownRegion { .. }));
        assert!(err.to_string().contains("Central, Eastern, Fort Portal"));
    }

    #[test]
    fn blank_region_is_missing() {
        assert_eq!(validate_region("  ", &regions()), Err(InputError::MissingRegion));
    }

    #[test]
    fn parses_four_comma_separated_values() {
        let bbox = parse_bounding_box("32.5, 0.1,33.0 , 0.6").unwrap();
        assert_eq!(bbox, BoundingBox::new(32.5, 0.1, 33.0, 0.6));
        assert_eq!(
            parse_bounding_box("10,20,80,90").unwrap().to_string(),
            "10, 20, 80, 90"
        );
    }

    #[test]
    fn rejects_wrong_value_count() {
        let err = parse_bounding_box("1, 2, 3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid bounding box coordinates: There must be exactly 4 values."
        );
        assert!(parse_bounding_box("1, 2, 3, 4, 5").is_err());
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = parse_bounding_box("1, two, 3, 4").unwrap_err();
        assert!(err.to_string().contains("'two' is not a number"));
        assert!(parse_bounding_box("1, 2, inf, 4").is_err());
    }

    #[test]
    fn rejects_inverted_extent() {
        let err = parse_bounding_box("5, 0, 5, 10").unwrap_err();
        assert!(err.to_string().contains("lower than or equal"));
        assert!(parse_bounding_box("0, 9, 10, 1").is_err());
    }

    #[test]
    fn empty_input_is_missing() {
        assert_eq!(parse_bounding_box(" "), Err(InputError::MissingBoundingBox));
    }
}
