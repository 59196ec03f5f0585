//! Raster export with atomic replacement of the output file.

use super::canvas::Canvas;
use super::types::RenderError;
use crate::draw::WHITE;
use image::{DynamicImage, ImageFormat};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output formats, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl RasterFormat {
    /// Maps a file extension (case-insensitive) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(RasterFormat::Png),
            "jpg" | "jpeg" => Some(RasterFormat::Jpeg),
            "bmp" => Some(RasterFormat::Bmp),
            "tif" | "tiff" => Some(RasterFormat::Tiff),
            _ => None,
        }
    }

    /// Resolves the format of `path`, failing with an export error when the
    /// extension is missing or unsupported.
    pub fn for_path(path: &Path) -> Result<Self, RenderError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| RenderError::export(path, "output path has no file extension"))?;

        Self::from_extension(extension).ok_or_else(|| {
            RenderError::export(path, format!("unsupported output format '.{extension}'"))
        })
    }
}

const MAX_TEMP_ATTEMPTS: u32 = 1024;

/// Temporary sibling of the output file, deleted on drop unless committed.
struct PendingFile {
    path: PathBuf,
    committed: bool,
}

impl PendingFile {
    /// Claims the first free `.{name}.tmp{n}` sibling of `target`.
    ///
    /// Candidates are claimed with `create_new`, so concurrent exports to the
    /// same target never share a temporary file.
    fn create(target: &Path) -> io::Result<(Self, File)> {
        let mut counter = 0u32;
        loop {
            let path = temp_path(target, counter);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    return Ok((
                        Self {
                            path,
                            committed: false,
                        },
                        file,
                    ));
                }
                Err(err)
                    if err.kind() == io::ErrorKind::AlreadyExists
                        && counter < MAX_TEMP_ATTEMPTS =>
                {
                    counter += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn commit(mut self, target: &Path) -> io::Result<()> {
        fs::rename(&self.path, target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.committed && fs::remove_file(&self.path).is_ok() {
            debug!("Removed temporary file {}", self.path.display());
        }
    }
}

fn temp_path(target: &Path, counter: u32) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "legend".to_string());

    if counter == 0 {
        target.with_file_name(format!(".{name}.tmp"))
    } else {
        target.with_file_name(format!(".{name}.tmp{counter}"))
    }
}

/// Encodes `canvas` as `format` and moves it into place at `path`.
///
/// Returns the size of the written file. On any failure the temporary file
/// is removed and `path` is left untouched.
pub fn export(canvas: &mut Canvas, path: &Path, format: RasterFormat) -> Result<u64, RenderError> {
    let (pending, file) =
        PendingFile::create(path).map_err(|err| RenderError::export(path, err))?;

    let mut writer = BufWriter::new(file);
    encode(canvas, &mut writer, format).map_err(|reason| RenderError::export(path, reason))?;

    let file = writer
        .into_inner()
        .map_err(|err| RenderError::export(path, err.into_error()))?;
    file.sync_all()
        .map_err(|err| RenderError::export(path, err))?;

    let bytes = file
        .metadata()
        .map_err(|err| RenderError::export(path, err))?
        .len();
    if bytes == 0 {
        return Err(RenderError::export(path, "encoder produced no data"));
    }
    drop(file);

    pending.commit(path).map_err(|err| {
        RenderError::export(path, format!("failed to move temporary file into place: {err}"))
    })?;

    info!(
        "Legend saved to {} ({}x{}, {} bytes)",
        path.display(),
        canvas.width(),
        canvas.height(),
        bytes
    );

    Ok(bytes)
}

fn encode(
    canvas: &mut Canvas,
    writer: &mut BufWriter<File>,
    format: RasterFormat,
) -> Result<(), String> {
    let image_format = match format {
        RasterFormat::Png => {
            canvas.write_png(writer).map_err(|err| err.to_string())?;
            return writer.flush().map_err(|err| err.to_string());
        }
        RasterFormat::Jpeg => ImageFormat::Jpeg,
        RasterFormat::Bmp => ImageFormat::Bmp,
        RasterFormat::Tiff => ImageFormat::Tiff,
    };

    let rgba = canvas.to_rgba().map_err(|err| err.to_string())?;
    let image = if format == RasterFormat::Jpeg {
        DynamicImage::ImageRgb8(flatten(&rgba))
    } else {
        DynamicImage::ImageRgba8(rgba)
    };

    image
        .write_to(&mut *writer, image_format)
        .map_err(|err| err.to_string())?;
    writer.flush().map_err(|err| err.to_string())
}

/// Composites straight-alpha pixels over a white matte.
fn flatten(rgba: &image::RgbaImage) -> image::RgbImage {
    let matte = WHITE.to_rgba8();
    image::RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8, m: u8| {
            ((c as u32 * a as u32 + m as u32 * (255 - a as u32) + 127) / 255) as u8
        };
        image::Rgb([blend(r, matte[0]), blend(g, matte[1]), blend(b, matte[2])])
    })
}
