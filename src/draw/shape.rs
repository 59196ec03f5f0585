//! Shape definitions for the legend display list.

use super::color::Color;
use super::font::FontDescriptor;
use crate::util::Rect;
use std::sync::Arc;

/// Horizontal alignment of a text shape relative to its anchor point.
///
/// Text is always vertically centered on the anchor's y coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor is the horizontal center of the text.
    Center,
    /// Anchor is the left edge of the text.
    Left,
}

/// A drawable primitive in device-pixel coordinates (origin top-left, y down).
///
/// Each variant carries everything needed to paint it independently, so a
/// [`Frame`](super::Frame) can be inspected in tests without rasterizing.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Raster image drawn 1:1 with its top-left corner at (x, y)
    Image {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Pixel data, already resampled to its final size
        image: Arc<image::RgbaImage>,
    },
    /// Filled circular legend marker
    Marker {
        /// Center X coordinate
        cx: f64,
        /// Center Y coordinate
        cy: f64,
        /// Radius in pixels
        radius: f64,
        /// Fill color
        color: Color,
        /// Edge color
        outline_color: Color,
        /// Edge width in pixels (0 disables the edge)
        outline_thickness: f64,
    },
    /// Single line of text
    Text {
        /// Anchor X coordinate (see `anchor`)
        x: f64,
        /// Vertical center
        y: f64,
        /// Text content to display
        text: String,
        /// Text color
        color: Color,
        /// Font size in device pixels
        size: f64,
        /// Font descriptor (family, weight, style)
        font_descriptor: FontDescriptor,
        /// Horizontal alignment
        anchor: TextAnchor,
    },
}

impl Shape {
    /// Returns the axis-aligned ink bounds of this shape.
    ///
    /// Returns `None` only when the shape has no drawable area (empty text,
    /// zero-sized image or marker).
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Shape::Image { x, y, image } => ensure_positive_rect_f64(
                *x,
                *y,
                *x + image.width() as f64,
                *y + image.height() as f64,
            ),
            Shape::Marker {
                cx,
                cy,
                radius,
                outline_thickness,
                ..
            } => {
                if *radius <= 0.0 {
                    return None;
                }
                let extent = radius + outline_thickness.max(0.0) / 2.0;
                ensure_positive_rect_f64(cx - extent, cy - extent, cx + extent, cy + extent)
            }
            Shape::Text {
                x,
                y,
                text,
                size,
                font_descriptor,
                anchor,
                ..
            } => bounding_box_for_text(*x, *y, text, *size, font_descriptor, *anchor),
        }
    }
}

/// Measured extents of a single line of text, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtents {
    /// Ink rectangle offset from the layout origin
    pub ink_x: f64,
    pub ink_y: f64,
    pub ink_width: f64,
    pub ink_height: f64,
    /// Logical size used for alignment
    pub logical_width: f64,
    pub logical_height: f64,
}

impl TextExtents {
    /// Top-left origin of the layout for a text anchored at (x, y).
    pub fn origin(&self, x: f64, y: f64, anchor: TextAnchor) -> (f64, f64) {
        let left = match anchor {
            TextAnchor::Center => x - self.logical_width / 2.0,
            TextAnchor::Left => x,
        };
        (left, y - self.logical_height / 2.0)
    }
}

/// Creates a Pango layout for `text` on the given context.
pub(crate) fn text_layout(
    ctx: &cairo::Context,
    text: &str,
    size: f64,
    font_descriptor: &FontDescriptor,
) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font_descriptor.to_pango(size)));
    layout.set_text(text);
    layout
}

pub(crate) fn extents_of(layout: &pango::Layout) -> TextExtents {
    let (ink_rect, logical_rect) = layout.extents();

    // Convert Pango units to floats
    let scale = pango::SCALE as f64;
    TextExtents {
        ink_x: ink_rect.x() as f64 / scale,
        ink_y: ink_rect.y() as f64 / scale,
        ink_width: ink_rect.width() as f64 / scale,
        ink_height: ink_rect.height() as f64 / scale,
        logical_width: logical_rect.width() as f64 / scale,
        logical_height: logical_rect.height() as f64 / scale,
    }
}

/// Measures a line of text without a canvas.
///
/// Uses a tiny image surface for measurement; the layout is all we need.
pub fn measure_text(text: &str, size: f64, font_descriptor: &FontDescriptor) -> Option<TextExtents> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1).ok()?;
    let ctx = cairo::Context::new(&surface).ok()?;
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = text_layout(&ctx, text, size, font_descriptor);
    Some(extents_of(&layout))
}

pub(crate) fn bounding_box_for_text(
    x: f64,
    y: f64,
    text: &str,
    size: f64,
    font_descriptor: &FontDescriptor,
    anchor: TextAnchor,
) -> Option<Rect> {
    if text.is_empty() {
        return None;
    }

    let extents = measure_text(text, size, font_descriptor)?;
    if extents.ink_width <= 0.0 || extents.ink_height <= 0.0 {
        return None;
    }

    let (left, top) = extents.origin(x, y, anchor);
    let min_x = left + extents.ink_x;
    let min_y = top + extents.ink_y;

    ensure_positive_rect_f64(
        min_x,
        min_y,
        min_x + extents.ink_width,
        min_y + extents.ink_height,
    )
}

fn ensure_positive_rect(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Rect> {
    let max_x = if min_x == max_x { max_x + 1 } else { max_x };
    let max_y = if min_y == max_y { max_y + 1 } else { max_y };
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}

fn ensure_positive_rect_f64(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Rect> {
    if max_x <= min_x || max_y <= min_y {
        return None;
    }
    ensure_positive_rect(
        min_x.floor() as i32,
        min_y.floor() as i32,
        max_x.ceil() as i32,
        max_y.ceil() as i32,
    )
}
