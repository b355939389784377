//! Image encoding for saving.
//!
//! JPEG output honors the requested quality. PNG and BMP are lossless and
//! ignore it.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EditError;
use crate::raster::RasterBuffer;

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
}

impl OutputFormat {
    /// Pick the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::WriteFailure`] for unknown or unsupported
    /// extensions.
    pub fn from_path(path: &Path) -> Result<Self, EditError> {
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => Ok(OutputFormat::Jpeg),
            Ok(ImageFormat::Png) => Ok(OutputFormat::Png),
            Ok(ImageFormat::Bmp) => Ok(OutputFormat::Bmp),
            _ => Err(EditError::WriteFailure(format!(
                "unsupported output format: {}",
                path.display()
            ))),
        }
    }

    /// Whether the quality setting affects the output.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

/// Encode a buffer to bytes.
///
/// # Arguments
///
/// * `buffer` - Image to encode
/// * `format` - Output format
/// * `quality` - JPEG quality, clamped to 1-100. Ignored for PNG and BMP.
pub fn encode_image(
    buffer: &RasterBuffer,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EditError> {
    if buffer.is_empty() {
        return Err(EditError::WriteFailure(format!(
            "invalid dimensions {}x{}",
            buffer.width(),
            buffer.height()
        )));
    }

    let mut output = Cursor::new(Vec::new());
    let (pixels, width, height) = (buffer.pixels(), buffer.width(), buffer.height());

    let result = match format {
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100))
            .write_image(pixels, width, height, ExtendedColorType::Rgb8),
        OutputFormat::Png => {
            PngEncoder::new(&mut output).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        OutputFormat::Bmp => {
            BmpEncoder::new(&mut output).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
    };
    result.map_err(|e| EditError::WriteFailure(e.to_string()))?;

    Ok(output.into_inner())
}

/// Encode `buffer` in the format implied by `path` and write it there.
pub fn save(buffer: &RasterBuffer, path: &Path, quality: u8) -> Result<(), EditError> {
    let format = OutputFormat::from_path(path)?;
    let bytes = encode_image(buffer, format, quality)?;
    std::fs::write(path, &bytes)
        .map_err(|e| EditError::WriteFailure(format!("{}: {}", path.display(), e)))?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        quality,
        "image saved"
    );
    Ok(())
}

/// Save a snapshot on a worker thread. The session keeps its own handle to
/// the snapshot and can continue editing while this runs.
pub fn save_in_background(
    snapshot: Arc<RasterBuffer>,
    path: PathBuf,
    quality: u8,
) -> JoinHandle<Result<(), EditError>> {
    std::thread::spawn(move || save(&snapshot, &path, quality))
}
