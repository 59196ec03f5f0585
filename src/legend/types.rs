//! Data types for legend rendering.

use crate::draw::Color;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default multiplicative factor applied to the logo's native size.
pub const DEFAULT_LOGO_SCALE: f64 = 0.5;

/// Rectangular geographic extent, in the caller's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Checks that every value is finite and that `min < max` on both axes.
    pub fn validate(&self) -> Result<(), RenderError> {
        let values = [self.xmin, self.ymin, self.xmax, self.ymax];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(RenderError::Validation(format!(
                "bounding box values must be finite, got {self}"
            )));
        }
        if self.xmin >= self.xmax || self.ymin >= self.ymax {
            return Err(RenderError::Validation(format!(
                "bounding box max values must exceed min values, got {self}"
            )));
        }
        Ok(())
    }
}

/// Formats as `xmin, ymin, xmax, ymax` using each value as given.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

/// Everything needed to render one legend image.
///
/// Built once per render call and only borrowed by the renderer.
#[derive(Debug, Clone)]
pub struct LegendSpec {
    /// Legend entry labels, in display order.
    pub labels: Vec<String>,
    /// Marker colors, index-aligned with `labels`.
    pub colors: Vec<Color>,
    /// Region name shown under the legend.
    pub region: String,
    /// Extent shown as "Bounding Box Coordinates".
    pub bounding_box: BoundingBox,
    /// Source raster for the logo.
    pub logo_path: PathBuf,
    /// Factor applied to the logo's native pixel size.
    pub logo_scale: f64,
    /// Destination file; the extension selects the raster format.
    pub output_path: PathBuf,
}

impl LegendSpec {
    /// Creates a spec with the default logo scale.
    pub fn new(
        labels: Vec<String>,
        colors: Vec<Color>,
        region: impl Into<String>,
        bounding_box: BoundingBox,
        logo_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            labels,
            colors,
            region: region.into(),
            bounding_box,
            logo_path: logo_path.as_ref().to_path_buf(),
            logo_scale: DEFAULT_LOGO_SCALE,
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    pub fn with_logo_scale(mut self, logo_scale: f64) -> Self {
        self.logo_scale = logo_scale;
        self
    }

    /// Label/color pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Color)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.colors.iter().copied())
    }

    /// Checks the invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.labels.is_empty() {
            return Err(RenderError::Validation(
                "legend needs at least one label".to_string(),
            ));
        }
        if self.labels.len() != self.colors.len() {
            return Err(RenderError::Validation(format!(
                "labels and colors must have the same length ({} labels, {} colors)",
                self.labels.len(),
                self.colors.len()
            )));
        }
        if self.region.trim().is_empty() {
            return Err(RenderError::Validation(
                "region must not be empty".to_string(),
            ));
        }
        self.bounding_box.validate()?;
        if !self.logo_scale.is_finite() || self.logo_scale <= 0.0 {
            return Err(RenderError::Validation(format!(
                "logo scale must be positive, got {}",
                self.logo_scale
            )));
        }
        Ok(())
    }
}

/// Successful render outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    /// Path of the written image.
    pub path: PathBuf,
    /// Size of the written file.
    pub bytes_written: u64,
    /// Pixel dimensions of the written image, after cropping.
    pub width: u32,
    pub height: u32,
    /// Timestamp text embedded in the image.
    pub timestamp: String,
}

/// Category of a [`RenderError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Load,
    /// Reserved: the static layout cannot fail.
    Layout,
    Export,
    Draw,
}

/// Errors that can occur while rendering a legend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid legend: {0}")]
    Validation(String),

    #[error("Failed to load logo {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Layout failed: {0}")]
    Layout(String),

    #[error("Failed to export legend to {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    #[error("Drawing failed: {0}")]
    Draw(#[from] cairo::Error),
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::Validation(_) => ErrorKind::Validation,
            RenderError::Load { .. } => ErrorKind::Load,
            RenderError::Layout(_) => ErrorKind::Layout,
            RenderError::Export { .. } => ErrorKind::Export,
            RenderError::Draw(_) => ErrorKind::Draw,
        }
    }

    pub(crate) fn load(path: &Path, reason: impl ToString) -> Self {
        RenderError::Load {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn export(path: &Path, reason: impl ToString) -> Self {
        RenderError::Export {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Stage of a single render call.
///
/// `Idle → Loading → LayingOut → Compositing → Exporting → Done`; any
/// non-terminal stage may move to `Failed`. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Idle,
    Loading,
    LayingOut,
    Compositing,
    Exporting,
    Done,
    Failed,
}

impl RenderStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, RenderStage::Done | RenderStage::Failed)
    }

    /// Returns true if `next` is a legal successor of this stage.
    pub fn can_advance_to(self, next: RenderStage) -> bool {
        use RenderStage::*;
        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Idle, Loading)
            | (Loading, LayingOut)
            | (LayingOut, Compositing)
            | (Compositing, Exporting)
            | (Exporting, Done) => true,
            _ => false,
        }
    }
}
