//! Builds the legend display list.
//!
//! Composition is pure: it produces a [`Frame`] that tests can inspect, and
//! painting happens separately on a [`Canvas`](super::canvas::Canvas).

use super::layout::{Layout, LayoutConfig};
use super::types::{BoundingBox, LegendSpec};
use crate::draw::{BLACK, FontDescriptor, Frame, Shape, TextAnchor, WHITE, measure_text};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// 24-hour timestamp format shown on the "Generated on" line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

pub fn region_text(region: &str) -> String {
    format!("Region: {region}")
}

pub fn bounding_box_text(bounding_box: &BoundingBox) -> String {
    format!("Bounding Box Coordinates: {bounding_box}")
}

pub fn timestamp_text(timestamp: &str) -> String {
    format!("Generated on: {timestamp}")
}

/// Measures the logical width of each label at the legend font size.
///
/// Labels that cannot be measured count as zero width.
pub fn measure_labels(
    config: &LayoutConfig,
    font: &FontDescriptor,
    labels: &[String],
) -> Vec<f64> {
    let size = config.pt_to_px(config.legend_font_pt);
    labels
        .iter()
        .map(|label| measure_text(label, size, font).map_or(0.0, |e| e.logical_width))
        .collect()
}

/// Builds the display list: logo, legend entries, then the three text lines.
pub fn compose(
    config: &LayoutConfig,
    font: &FontDescriptor,
    layout: &Layout,
    spec: &LegendSpec,
    logo: Arc<image::RgbaImage>,
    timestamp: &str,
) -> Frame {
    let mut frame = Frame::new();

    let (logo_x, logo_y) = config.to_pixels(layout.logo_anchor);
    frame.add_shape(Shape::Image {
        x: logo_x,
        y: logo_y,
        image: logo,
    });

    let legend_size = config.pt_to_px(config.legend_font_pt);
    let radius = config.pt_to_px(config.marker_size_pt) / 2.0;
    let edge = config.pt_to_px(config.marker_edge_pt);

    for ((label, color), row) in spec.entries().zip(&layout.legend_rows) {
        let (cx, cy) = config.to_pixels(row.marker);
        frame.add_shape(Shape::Marker {
            cx,
            cy,
            radius,
            color,
            outline_color: WHITE,
            outline_thickness: edge,
        });

        let (x, y) = config.to_pixels(row.label);
        frame.add_shape(text(x, y, label.to_string(), legend_size, font, TextAnchor::Left));
    }

    let lines = [
        (layout.region_line, region_text(&spec.region), config.region_font_pt),
        (
            layout.bbox_line,
            bounding_box_text(&spec.bounding_box),
            config.bbox_font_pt,
        ),
        (
            layout.timestamp_line,
            timestamp_text(timestamp),
            config.timestamp_font_pt,
        ),
    ];
    for (position, content, points) in lines {
        let (x, y) = config.to_pixels(position);
        frame.add_shape(text(
            x,
            y,
            content,
            config.pt_to_px(points),
            font,
            TextAnchor::Center,
        ));
    }

    frame
}

fn text(
    x: f64,
    y: f64,
    text: String,
    size: f64,
    font: &FontDescriptor,
    anchor: TextAnchor,
) -> Shape {
    Shape::Text {
        x,
        y,
        text,
        color: BLACK,
        size,
        font_descriptor: font.clone(),
        anchor,
    }
}
