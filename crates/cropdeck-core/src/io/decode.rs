//! Image decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::info;

use crate::error::EditError;
use crate::raster::RasterBuffer;

/// Decode an encoded image (JPEG, PNG or BMP) into an RGB buffer, applying
/// any EXIF orientation so the buffer is upright.
///
/// # Errors
///
/// Returns [`EditError::UnreadableFile`] if the format is not recognized or
/// the data is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<RasterBuffer, EditError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EditError::UnreadableFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| EditError::UnreadableFile(e.to_string()))?;

    let buffer = RasterBuffer::from_rgb_image(apply_orientation(img, orientation).into_rgb8());
    if buffer.is_empty() {
        return Err(EditError::UnreadableFile("image has no pixels".to_string()));
    }
    Ok(buffer)
}

/// Read and decode the image at `path`.
pub fn load(path: &Path) -> Result<RasterBuffer, EditError> {
    let bytes = std::fs::read(path)
        .map_err(|e| EditError::UnreadableFile(format!("{}: {}", path.display(), e)))?;
    let buffer = decode_image(&bytes)?;
    info!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "image loaded"
    );
    Ok(buffer)
}

/// EXIF orientation tag value, or 1 (upright) when absent.
fn extract_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
