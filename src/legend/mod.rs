//! Legend rendering pipeline.
//!
//! A render call runs four stages in sequence:
//! - loading and resampling the logo ([`loader`])
//! - computing the static layout ([`layout`])
//! - building and painting the display list ([`compositor`], [`canvas`])
//! - encoding and atomically writing the image ([`export`])
//!
//! Each call owns its logo buffer and canvas, so independent calls can run
//! on separate threads without coordination.

pub mod canvas;
pub mod compositor;
pub mod export;
pub mod layout;
pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use layout::{Layout, LayoutConfig, NormPoint};
pub use types::{
    BoundingBox, DEFAULT_LOGO_SCALE, ErrorKind, LegendSpec, RenderError, RenderReport,
    RenderStage,
};

use crate::draw::{FontDescriptor, Frame};
use crate::util::Rect;
use canvas::Canvas;
use chrono::{Local, NaiveDateTime};
use export::RasterFormat;
use log::debug;
use std::path::Path;
use std::sync::Arc;

/// Renders legend images from [`LegendSpec`]s.
///
/// Holds only immutable settings; share one renderer across threads freely.
#[derive(Debug, Clone, Default)]
pub struct LegendRenderer {
    layout: LayoutConfig,
    font: FontDescriptor,
}

impl LegendRenderer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            font: FontDescriptor::default(),
        }
    }

    /// Uses `font` for every text element.
    pub fn with_font(mut self, font: FontDescriptor) -> Self {
        self.font = font;
        self
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Renders `spec` and writes it to `spec.output_path`, stamped with the
    /// current local time.
    pub fn render_and_save(&self, spec: &LegendSpec) -> Result<RenderReport, RenderError> {
        self.render_and_save_at(spec, Local::now().naive_local())
    }

    /// Same as [`render_and_save`](Self::render_and_save) with an explicit
    /// generation time.
    pub fn render_and_save_at(
        &self,
        spec: &LegendSpec,
        generated_at: NaiveDateTime,
    ) -> Result<RenderReport, RenderError> {
        let mut job = RenderJob::new(&spec.output_path);
        let result = self.run(&mut job, spec, generated_at);
        match &result {
            Ok(_) => job.advance(RenderStage::Done),
            Err(err) => {
                debug!("Render of {} failed: {}", spec.output_path.display(), err);
                job.advance(RenderStage::Failed);
            }
        }
        result
    }

    /// Builds the display list for `spec` without touching the filesystem
    /// beyond reading the logo.
    pub fn compose(
        &self,
        spec: &LegendSpec,
        generated_at: NaiveDateTime,
    ) -> Result<Frame, RenderError> {
        spec.validate()?;
        let logo = Arc::new(loader::load_logo(&spec.logo_path, spec.logo_scale)?);
        let layout = self.compute_layout(spec);
        Ok(self.compose_with(spec, &layout, logo, generated_at))
    }

    fn compute_layout(&self, spec: &LegendSpec) -> Layout {
        let widths = compositor::measure_labels(&self.layout, &self.font, &spec.labels);
        layout::compute_layout(&self.layout, &widths)
    }

    fn compose_with(
        &self,
        spec: &LegendSpec,
        layout: &Layout,
        logo: Arc<image::RgbaImage>,
        generated_at: NaiveDateTime,
    ) -> Frame {
        let timestamp = compositor::format_timestamp(&generated_at);
        compositor::compose(&self.layout, &self.font, layout, spec, logo, &timestamp)
    }

    fn run(
        &self,
        job: &mut RenderJob<'_>,
        spec: &LegendSpec,
        generated_at: NaiveDateTime,
    ) -> Result<RenderReport, RenderError> {
        spec.validate()?;
        let format = RasterFormat::for_path(&spec.output_path)?;

        job.advance(RenderStage::Loading);
        let logo = Arc::new(loader::load_logo(&spec.logo_path, spec.logo_scale)?);

        job.advance(RenderStage::LayingOut);
        let layout = self.compute_layout(spec);

        job.advance(RenderStage::Compositing);
        let frame = self.compose_with(spec, &layout, logo, generated_at);
        let mut canvas = Canvas::new(self.crop_window(&frame))?;
        canvas.paint(&frame)?;

        job.advance(RenderStage::Exporting);
        let bytes_written = export::export(&mut canvas, &spec.output_path, format)?;

        Ok(RenderReport {
            path: spec.output_path.clone(),
            bytes_written,
            width: canvas.width(),
            height: canvas.height(),
            timestamp: compositor::format_timestamp(&generated_at),
        })
    }

    /// Ink bounds of the frame plus the configured pad, or the whole figure
    /// when nothing has ink.
    fn crop_window(&self, frame: &Frame) -> Rect {
        let (width, height) = self.layout.canvas_size();
        let figure = Rect {
            x: 0,
            y: 0,
            width: width.max(1) as i32,
            height: height.max(1) as i32,
        };

        match frame.bounds() {
            Some(mut window) => {
                window.inflate(self.layout.pad_px());
                if window.is_valid() { window } else { figure }
            }
            None => figure,
        }
    }
}

/// Stage tracker for one render call.
struct RenderJob<'a> {
    output: &'a Path,
    stage: RenderStage,
}

impl<'a> RenderJob<'a> {
    fn new(output: &'a Path) -> Self {
        Self {
            output,
            stage: RenderStage::Idle,
        }
    }

    fn advance(&mut self, next: RenderStage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "invalid render transition {:?} -> {:?}",
            self.stage,
            next
        );
        debug!(
            "{}: {:?} -> {:?}",
            self.output.display(),
            self.stage,
            next
        );
        self.stage = next;
    }
}
