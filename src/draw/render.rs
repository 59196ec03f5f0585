//! Cairo-based rendering functions for shapes.

use super::color::Color;
use super::font::FontDescriptor;
use super::shape::{Shape, TextAnchor, extents_of, text_layout};
use super::surface::surface_from_rgba;

/// Renders all shapes in a collection to a Cairo context.
///
/// Iterates through the shapes slice and renders each one in order.
/// Shapes are drawn in the order they appear (first shape = bottom layer).
///
/// # Errors
/// Returns the first Cairo error raised while painting; shapes after the
/// failing one are not drawn.
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape]) -> Result<(), cairo::Error> {
    for shape in shapes {
        render_shape(ctx, shape)?;
    }
    Ok(())
}

/// Renders a single shape to a Cairo context.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) -> Result<(), cairo::Error> {
    match shape {
        Shape::Image { x, y, image } => render_image(ctx, *x, *y, image),
        Shape::Marker {
            cx,
            cy,
            radius,
            color,
            outline_color,
            outline_thickness,
        } => render_marker(
            ctx,
            *cx,
            *cy,
            *radius,
            *color,
            *outline_color,
            *outline_thickness,
        ),
        Shape::Text {
            x,
            y,
            text,
            color,
            size,
            font_descriptor,
            anchor,
        } => render_text(ctx, *x, *y, text, *color, *size, font_descriptor, *anchor),
    }
}

/// Paints an RGBA image 1:1 with its top-left corner at (x, y).
pub fn render_image(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    image: &image::RgbaImage,
) -> Result<(), cairo::Error> {
    if image.width() == 0 || image.height() == 0 {
        return Ok(());
    }

    let surface = surface_from_rgba(image)?;

    ctx.save()?;
    ctx.set_source_surface(&surface, x, y)?;
    ctx.rectangle(x, y, image.width() as f64, image.height() as f64);
    ctx.fill()?;
    ctx.restore()
}

/// Renders a filled circle with an optional edge.
pub fn render_marker(
    ctx: &cairo::Context,
    center_x: f64,
    center_y: f64,
    radius: f64,
    fill_color: Color,
    outline_color: Color,
    outline_thickness: f64,
) -> Result<(), cairo::Error> {
    if radius <= 0.0 {
        return Ok(());
    }

    ctx.save()?;
    ctx.new_path();
    ctx.arc(center_x, center_y, radius, 0.0, std::f64::consts::PI * 2.0);

    if fill_color.a > 0.0 {
        fill_color.apply(ctx);
        ctx.fill_preserve()?;
    }

    if outline_color.a > 0.0 && outline_thickness > 0.0 {
        outline_color.apply(ctx);
        ctx.set_line_width(outline_thickness);
        ctx.stroke_preserve()?;
    }

    ctx.new_path();
    ctx.restore()
}

/// Renders one line of text using Pango.
///
/// The text is vertically centered on `y`; `anchor` decides whether `x` is
/// the horizontal center or the left edge of the logical text box.
#[allow(clippy::too_many_arguments)]
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
    font_descriptor: &FontDescriptor,
    anchor: TextAnchor,
) -> Result<(), cairo::Error> {
    if text.is_empty() {
        return Ok(());
    }

    // Save context state to prevent settings from leaking to other drawing operations
    ctx.save()?;

    // Gray antialiasing; subpixel fringes on transparent surfaces
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = text_layout(ctx, text, size, font_descriptor);
    let (left, top) = extents_of(&layout).origin(x, y, anchor);

    ctx.move_to(left, top);
    color.apply(ctx);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore()
}
