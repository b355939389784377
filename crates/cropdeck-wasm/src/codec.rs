//! Decode and encode bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_jpeg } from '@cropdeck/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const jpeg = encode_jpeg(image, 90);
//! ```

use crate::types::{format_from_u8, JsRasterBuffer};
use cropdeck_core::{io, EditError, OutputFormat};
use wasm_bindgen::prelude::*;

pub(crate) fn to_js_error(err: EditError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Decode JPEG, PNG or BMP bytes into an upright RGB image.
///
/// # Errors
///
/// Returns an error string if the format is unknown or the data is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterBuffer, JsValue> {
    io::decode_image(bytes)
        .map(|buffer| JsRasterBuffer::from_raster(&buffer))
        .map_err(to_js_error)
}

/// Encode an image as JPEG. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode(image, OutputFormat::Jpeg, quality).map_err(to_js_error)
}

/// Encode an image in the selected format (0 = JPEG, 1 = PNG, 2 = BMP).
#[wasm_bindgen]
pub fn encode_image(image: &JsRasterBuffer, format: u8, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = format_from_u8(format)
        .ok_or_else(|| JsValue::from_str(&format!("unknown output format: {}", format)))?;
    encode(image, format, quality).map_err(to_js_error)
}

fn encode(image: &JsRasterBuffer, format: OutputFormat, quality: u8) -> Result<Vec<u8>, EditError> {
    let buffer = image.to_raster().ok_or_else(|| {
        EditError::WriteFailure(format!(
            "pixel data length {} does not match {}x{}",
            image.byte_length(),
            image.width(),
            image.height()
        ))
    })?;
    io::encode_image(&buffer, format, quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_creates_valid_jpeg() {
        let img = JsRasterBuffer::new(10, 10, vec![128u8; 10 * 10 * 3]);
        let jpeg = encode(&img, OutputFormat::Jpeg, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_rejects_mismatched_pixels() {
        let img = JsRasterBuffer::new(100, 100, vec![128u8; 50]);
        assert!(matches!(
            encode(&img, OutputFormat::Png, 90),
            Err(EditError::WriteFailure(_))
        ));
    }

    #[test]
    fn test_png_round_trip_through_core() {
        let img = JsRasterBuffer::new(3, 2, (0..18).collect());
        let bytes = encode(&img, OutputFormat::Png, 50).unwrap();
        let decoded = io::decode_image(&bytes).unwrap();
        assert_eq!(decoded.pixels(), img.pixels().as_slice());
    }
}
