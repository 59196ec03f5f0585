//! Geometry and path helpers shared by the renderer and the CLI.

use std::path::PathBuf;

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle helper used for ink bounds and cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);

        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(&mut self, amount: i32) {
        self.x -= amount;
        self.y -= amount;
        self.width += amount * 2;
        self.height += amount * 2;
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

// ============================================================================
// Paths
// ============================================================================

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_rejects_empty_area() {
        assert!(Rect::new(0, 0, 0, 10).is_none());
        assert!(Rect::from_min_max(5, 5, 5, 9).is_none());
    }

    #[test]
    fn union_covers_both_rects() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(20, -5, 5, 5).unwrap();
        assert_eq!(a.union(b), Rect::from_min_max(0, -5, 25, 10).unwrap());
    }

    #[test]
    fn inflate_grows_every_side() {
        let mut rect = Rect::new(30, 40, 100, 50).unwrap();
        rect.inflate(30);
        assert_eq!(rect, Rect::new(0, 10, 160, 110).unwrap());
        assert!(rect.is_valid());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }
}
