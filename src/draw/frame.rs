//! Frame container for the legend display list.

use super::color::Color;
use super::shape::Shape;
use crate::util::Rect;

/// Ordered collection of shapes making up one legend image.
///
/// Shapes are painted in the order they appear (first shape = bottom layer).
/// The frame doubles as the inspectable "text layer" of a render: callers can
/// read back every string and marker without rasterizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Vector of all shapes in draw order (first = bottom layer, last = top layer)
    pub shapes: Vec<Shape>,
}

impl Frame {
    /// Creates a new empty frame with no shapes.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Adds a new shape to the frame (drawn on top of existing shapes).
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Iterates over the text content of every text shape, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Iterates over marker fill colors, in draw order.
    pub fn marker_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Marker { color, .. } => Some(*color),
            _ => None,
        })
    }

    /// Union of the ink bounds of every shape, or `None` for an empty frame.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .filter_map(Shape::bounding_box)
            .reduce(Rect::union)
    }
}
