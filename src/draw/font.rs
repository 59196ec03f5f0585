//! Font descriptor for text rendering.

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, and style.
/// Sizes are supplied separately at render time, already converted to device
/// pixels, so the same descriptor renders identically at any DPI.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "DejaVu Sans")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light")
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: &str, weight: &str, style: &str) -> Self {
        Self {
            family: family.to_string(),
            weight: weight.to_string(),
            style: style.to_string(),
        }
    }

    /// Converts this descriptor to a Pango description string without a size.
    ///
    /// Format: "Family Style Weight"
    /// Example: "Sans" or "Monospace Italic Bold"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.join(" ")
    }

    /// Builds a Pango font description sized in device pixels.
    ///
    /// Absolute sizing bypasses the Pango/Cairo context resolution (96 DPI by
    /// default), so point sizes must be converted by the caller.
    pub fn to_pango(&self, pixel_size: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string());
        desc.set_absolute_size(pixel_size * pango::SCALE as f64);
        desc
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_default() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(), "Sans");
    }

    #[test]
    fn test_pango_string_italic_bold() {
        let font = FontDescriptor::new("Monospace", "bold", "italic");
        assert_eq!(font.to_pango_string(), "Monospace Italic Bold");
    }

    #[test]
    fn test_absolute_size_is_in_pango_units() {
        let desc = FontDescriptor::default().to_pango(41.0);
        assert!(desc.is_size_absolute());
        assert_eq!(desc.size(), 41 * pango::SCALE);
    }
}
