//! Scoped drawing surface for one render call.

use crate::draw::{Frame, render_shapes, surface::rgba_from_surface};
use crate::util::Rect;
use cairo::{Format, ImageSurface};
use log::debug;
use std::io::Write;

/// ARGB32 surface covering a window of the figure.
///
/// The window's top-left corner sits at `origin` in figure pixels, so shapes
/// keep their figure coordinates while only the cropped area is allocated.
/// Drawing contexts live only inside [`Canvas::paint`]; the surface itself
/// is finished when the canvas is dropped, on success and failure alike.
pub struct Canvas {
    surface: ImageSurface,
    origin: (i32, i32),
}

impl Canvas {
    /// Allocates a transparent canvas covering `window`.
    pub fn new(window: Rect) -> Result<Self, cairo::Error> {
        let surface = ImageSurface::create(Format::ARgb32, window.width, window.height)?;
        debug!(
            "Allocated {}x{} canvas at ({}, {})",
            window.width, window.height, window.x, window.y
        );
        Ok(Self {
            surface,
            origin: (window.x, window.y),
        })
    }

    pub fn width(&self) -> u32 {
        self.surface.width().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height().max(0) as u32
    }

    /// Paints every shape of `frame` in order.
    pub fn paint(&self, frame: &Frame) -> Result<(), cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        ctx.translate(-self.origin.0 as f64, -self.origin.1 as f64);
        render_shapes(&ctx, &frame.shapes)?;
        drop(ctx);

        self.surface.flush();
        Ok(())
    }

    /// Encodes the canvas as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), cairo::IoError> {
        self.surface.write_to_png(writer)
    }

    /// Copies the pixels out as straight-alpha RGBA.
    pub fn to_rgba(&mut self) -> Result<image::RgbaImage, cairo::BorrowError> {
        rgba_from_surface(&mut self.surface)
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        self.surface.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{RED, Shape, WHITE};

    #[test]
    fn paint_uses_figure_coordinates() {
        let mut frame = Frame::new();
        frame.add_shape(Shape::Marker {
            cx: 110.0,
            cy: 210.0,
            radius: 5.0,
            color: RED,
            outline_color: WHITE,
            outline_thickness: 0.0,
        });

        let mut canvas = Canvas::new(Rect::new(100, 200, 20, 20).unwrap()).unwrap();
        canvas.paint(&frame).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (20, 20));

        let pixels = canvas.to_rgba().unwrap();
        assert_eq!(pixels.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(pixels.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn write_png_produces_png_bytes() {
        let canvas = Canvas::new(Rect::new(0, 0, 8, 8).unwrap()).unwrap();
        let mut bytes = Vec::new();
        canvas.write_png(&mut bytes).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
