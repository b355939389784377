//! Loading and saving images.
//!
//! Decoding sniffs the container (JPEG, PNG, BMP), converts to 3-channel RGB
//! and corrects EXIF orientation. Encoding picks the format from the output
//! path's extension.
//!
//! The session never calls these directly. The [`ImageLoader`] and
//! [`ImageWriter`] traits are the seams the editor controller uses, with
//! [`FsCodec`] as the filesystem implementation.

mod decode;
mod encode;

pub use decode::{decode_image, load};
pub use encode::{encode_image, save, save_in_background, OutputFormat};

use std::path::Path;

use crate::error::EditError;
use crate::raster::RasterBuffer;

/// Source of decoded images.
pub trait ImageLoader {
    /// # Errors
    ///
    /// [`EditError::UnreadableFile`] on a bad path, unknown format or
    /// corrupt data.
    fn load(&self, path: &Path) -> Result<RasterBuffer, EditError>;
}

/// Sink for encoded images.
pub trait ImageWriter {
    /// `quality` is 1-100 and only affects lossy formats.
    ///
    /// # Errors
    ///
    /// [`EditError::WriteFailure`] on encoding or I/O errors.
    fn save(&self, buffer: &RasterBuffer, path: &Path, quality: u8) -> Result<(), EditError>;
}

/// Filesystem-backed loader and writer using the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCodec;

impl ImageLoader for FsCodec {
    fn load(&self, path: &Path) -> Result<RasterBuffer, EditError> {
        load(path)
    }
}

impl ImageWriter for FsCodec {
    fn save(&self, buffer: &RasterBuffer, path: &Path, quality: u8) -> Result<(), EditError> {
        save(buffer, path, quality)
    }
}
