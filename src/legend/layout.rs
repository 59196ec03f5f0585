//! Static legend layout.
//!
//! Positions are normalized figure coordinates: `(0, 0)` is the bottom-left
//! corner of the figure and `(1, 1)` the top-right, independent of DPI.
//! The layout never adapts to text length or entry count beyond centering
//! the legend block, so long legends can overlap the text lines below.

/// Fixed layout constants for a legend figure.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Figure size in inches.
    pub figure_width_in: f64,
    pub figure_height_in: f64,
    /// Rasterization density.
    pub dpi: f64,
    /// Logo box as `[left, bottom, width, height]`; the logo hangs from its
    /// top-left corner.
    pub logo_box: [f64; 4],
    /// Center of the legend block.
    pub legend_anchor: (f64, f64),
    /// Horizontal center shared by the three text lines.
    pub text_x: f64,
    pub region_y: f64,
    pub bbox_y: f64,
    pub timestamp_y: f64,
    /// Font sizes in points.
    pub legend_font_pt: f64,
    pub region_font_pt: f64,
    pub bbox_font_pt: f64,
    pub timestamp_font_pt: f64,
    /// Marker diameter and edge width in points.
    pub marker_size_pt: f64,
    pub marker_edge_pt: f64,
    /// Legend spacing, in multiples of the legend font size.
    pub handle_length_em: f64,
    pub handle_text_pad_em: f64,
    pub label_spacing_em: f64,
    /// Margin kept around the cropped ink, in inches.
    pub pad_in: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            figure_width_in: 4.0,
            figure_height_in: 5.0,
            dpi: 300.0,
            logo_box: [0.1, 0.7, 0.3, 0.2],
            legend_anchor: (0.5, 0.4),
            text_x: 0.5,
            region_y: 0.25,
            bbox_y: 0.18,
            timestamp_y: 0.10,
            legend_font_pt: 10.0,
            region_font_pt: 12.0,
            bbox_font_pt: 10.0,
            timestamp_font_pt: 10.0,
            marker_size_pt: 10.0,
            marker_edge_pt: 1.0,
            handle_length_em: 2.0,
            handle_text_pad_em: 0.8,
            label_spacing_em: 0.5,
            pad_in: 0.1,
        }
    }
}

impl LayoutConfig {
    /// Canvas size in pixels (`inches * dpi`, truncated).
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            (self.figure_width_in * self.dpi) as u32,
            (self.figure_height_in * self.dpi) as u32,
        )
    }

    /// Converts points (1/72 inch) to device pixels.
    pub fn pt_to_px(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    /// Crop margin in device pixels.
    pub fn pad_px(&self) -> i32 {
        (self.pad_in * self.dpi).round() as i32
    }

    /// Converts a normalized figure point to device pixels (y down).
    pub fn to_pixels(&self, point: NormPoint) -> (f64, f64) {
        let (width, height) = self.canvas_size();
        (point.x * width as f64, (1.0 - point.y) * height as f64)
    }

    fn to_normalized(&self, x: f64, y: f64) -> NormPoint {
        let (width, height) = self.canvas_size();
        NormPoint {
            x: x / width as f64,
            y: 1.0 - y / height as f64,
        }
    }
}

/// Point in normalized figure coordinates (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

impl NormPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Positions for one legend entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendRow {
    /// Marker center.
    pub marker: NormPoint,
    /// Left edge and vertical center of the label.
    pub label: NormPoint,
}

/// Every element position of one legend figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Top-left corner of the logo.
    pub logo_anchor: NormPoint,
    /// Legend rows, top to bottom, in entry order.
    pub legend_rows: Vec<LegendRow>,
    /// Centers of the three text lines.
    pub region_line: NormPoint,
    pub bbox_line: NormPoint,
    pub timestamp_line: NormPoint,
}

/// Computes the layout for a legend whose labels measure `label_widths`
/// device pixels.
///
/// Rows are one legend-font line tall and `label_spacing_em` apart; the
/// block (handle box, pad, widest label) is centered on `legend_anchor`.
pub fn compute_layout(config: &LayoutConfig, label_widths: &[f64]) -> Layout {
    let [logo_left, logo_bottom, _, logo_height] = config.logo_box;

    let font_px = config.pt_to_px(config.legend_font_pt);
    let row_height = font_px.max(config.pt_to_px(config.marker_size_pt));
    let spacing = config.label_spacing_em * font_px;
    let handle_length = config.handle_length_em * font_px;
    let handle_pad = config.handle_text_pad_em * font_px;

    let rows = label_widths.len();
    let widest = label_widths.iter().copied().fold(0.0, f64::max);
    let block_width = handle_length + handle_pad + widest;
    let block_height = if rows == 0 {
        0.0
    } else {
        rows as f64 * row_height + (rows - 1) as f64 * spacing
    };

    let (anchor_x, anchor_y) = config.to_pixels(NormPoint::new(
        config.legend_anchor.0,
        config.legend_anchor.1,
    ));
    let left = anchor_x - block_width / 2.0;
    let top = anchor_y - block_height / 2.0;

    let legend_rows = (0..rows)
        .map(|i| {
            let center_y = top + i as f64 * (row_height + spacing) + row_height / 2.0;
            LegendRow {
                marker: config.to_normalized(left + handle_length / 2.0, center_y),
                label: config.to_normalized(left + handle_length + handle_pad, center_y),
            }
        })
        .collect();

    Layout {
        logo_anchor: NormPoint::new(logo_left, logo_bottom + logo_height),
        legend_rows,
        region_line: NormPoint::new(config.text_x, config.region_y),
        bbox_line: NormPoint::new(config.text_x, config.bbox_y),
        timestamp_line: NormPoint::new(config.text_x, config.timestamp_y),
    }
}
