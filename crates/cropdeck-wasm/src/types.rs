//! WASM-compatible wrapper types for image data.

use cropdeck_core::{FilterType, OutputFormat, RasterBuffer, Rectangle};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// An RGB image handed across the JS boundary.
///
/// Pixel data stays in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`, so later edits never alias a buffer JavaScript holds.
#[wasm_bindgen]
pub struct JsRasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterBuffer {
    /// Wrap RGB pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterBuffer {
        JsRasterBuffer {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Copy of the RGB pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Same pixels as RGBA, ready for `new ImageData(...)` on a canvas.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        rgba
    }
}

impl JsRasterBuffer {
    pub(crate) fn from_raster(buffer: &RasterBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: buffer.pixels().to_vec(),
        }
    }

    /// Checked conversion back into a core buffer. `None` if the pixel
    /// length does not match the dimensions.
    pub(crate) fn to_raster(&self) -> Option<RasterBuffer> {
        RasterBuffer::from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// A selection as seen by the canvas: top-left corner plus size.
///
/// Serialized to a plain `{ x, y, width, height, circular }` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct SelectionJs {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// The committed crop will be masked to the inscribed circle.
    pub circular: bool,
}

impl SelectionJs {
    pub(crate) fn from_rect(rect: &Rectangle, circular: bool) -> Self {
        Self {
            x: rect.x1,
            y: rect.y1,
            width: rect.width(),
            height: rect.height(),
            circular,
        }
    }

    pub(crate) fn to_js(self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Resampling filter selector:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
///
/// Anything else falls back to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Output format selector: 0 = JPEG, 1 = PNG, 2 = BMP.
pub(crate) fn format_from_u8(value: u8) -> Option<OutputFormat> {
    match value {
        0 => Some(OutputFormat::Jpeg),
        1 => Some(OutputFormat::Png),
        2 => Some(OutputFormat::Bmp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_buffer_creation() {
        let img = JsRasterBuffer::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_from_raster_copies() {
        let core = RasterBuffer::filled(4, 2, [9, 8, 7]);
        let js = JsRasterBuffer::from_raster(&core);
        assert_eq!(js.pixels(), core.pixels());
        assert_eq!(js.to_raster(), Some(core));
    }

    #[test]
    fn test_to_raster_rejects_bad_length() {
        let js = JsRasterBuffer::new(10, 10, vec![0u8; 12]);
        assert!(js.to_raster().is_none());
    }

    #[test]
    fn test_to_rgba() {
        let js = JsRasterBuffer::new(2, 1, vec![255, 0, 0, 0, 255, 0]);
        assert_eq!(js.to_rgba(), vec![255, 0, 0, 255, 0, 255, 0, 255]);
    }

    #[test]
    fn test_selection_from_rect() {
        let sel = SelectionJs::from_rect(&Rectangle::new(10, 20, 50, 35), true);
        assert_eq!(
            sel,
            SelectionJs {
                x: 10,
                y: 20,
                width: 40,
                height: 15,
                circular: true,
            }
        );
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Bilinear);
    }

    #[test]
    fn test_format_from_u8() {
        assert_eq!(format_from_u8(0), Some(OutputFormat::Jpeg));
        assert_eq!(format_from_u8(1), Some(OutputFormat::Png));
        assert_eq!(format_from_u8(2), Some(OutputFormat::Bmp));
        assert_eq!(format_from_u8(3), None);
    }
}
