//! Logo loading and resampling.

use super::types::RenderError;
use image::imageops::{self, FilterType};
use log::debug;
use std::path::Path;

/// Largest logo side, in pixels, that a Cairo image surface accepts.
pub const MAX_LOGO_DIMENSION: u32 = 32767;

/// Target size for an image of `width`×`height` scaled by `scale`.
///
/// Each dimension is truncated toward zero, so `(101, 51)` at `0.5`
/// becomes `(50, 25)`.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let truncate = |d: u32| (d as f64 * scale).floor().max(0.0) as u32;
    (truncate(width), truncate(height))
}

/// Decodes the logo at `path` and resamples it by `scale` with Lanczos3.
///
/// # Errors
/// Returns [`RenderError::Load`] if the file is missing or unreadable, the
/// format is unsupported or undecodable, or the scaled size would be empty
/// or larger than [`MAX_LOGO_DIMENSION`] on either side.
pub fn load_logo(path: &Path, scale: f64) -> Result<image::RgbaImage, RenderError> {
    if !path.is_file() {
        return Err(RenderError::load(path, "file does not exist"));
    }

    let decoded = image::ImageReader::open(path)
        .map_err(|err| RenderError::load(path, err))?
        .with_guessed_format()
        .map_err(|err| RenderError::load(path, err))?
        .decode()
        .map_err(|err| RenderError::load(path, err))?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    let (target_width, target_height) = scaled_dimensions(width, height, scale);

    if target_width == 0 || target_height == 0 {
        return Err(RenderError::load(
            path,
            format!("{width}x{height} logo scaled by {scale} is empty"),
        ));
    }

    if target_width > MAX_LOGO_DIMENSION || target_height > MAX_LOGO_DIMENSION {
        return Err(RenderError::load(
            path,
            format!(
                "{width}x{height} logo scaled by {scale} exceeds maximum size \
                 {MAX_LOGO_DIMENSION}x{MAX_LOGO_DIMENSION}"
            ),
        ));
    }

    debug!(
        "Resampling logo {} from {}x{} to {}x{}",
        path.display(),
        width,
        height,
        target_width,
        target_height
    );

    if (target_width, target_height) == (width, height) {
        return Ok(rgba);
    }

    Ok(imageops::resize(
        &rgba,
        target_width,
        target_height,
        FilterType::Lanczos3,
    ))
}
