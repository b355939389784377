//! Edit session bindings for the browser canvas.
//!
//! The front end forwards pointer events in working-buffer pixel
//! coordinates and redraws from `preview()` after every call that returns
//! `true`. Recoverable problems (a degenerate drag, nothing to undo) are
//! logged to the browser console and reported as `false`.
//!
//! ```typescript
//! const session = new JsEditSession(bytes);
//! session.set_policy(1); // Square
//! canvas.onpointerdown = (e) => session.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => {
//!   session.pointer_move(e.offsetX, e.offsetY);
//!   draw(session.preview_rgba());
//! };
//! canvas.onpointerup = (e) => {
//!   if (session.pointer_up(e.offsetX, e.offsetY)) draw(session.preview_rgba());
//! };
//! ```

use crate::codec::to_js_error;
use crate::types::{filter_from_u8, format_from_u8, JsRasterBuffer, SelectionJs};
use cropdeck_core::{io, CropPolicy, EditError, EditSession, EditorConfig, Point};
use wasm_bindgen::prelude::*;
use web_sys::console;

#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Start a session on encoded image bytes (JPEG, PNG or BMP).
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<JsEditSession, JsValue> {
        let image = io::decode_image(bytes).map_err(to_js_error)?;
        EditSession::new(image)
            .map(|inner| Self { inner })
            .map_err(to_js_error)
    }

    /// Start a session on encoded bytes with settings from a JSON string
    /// (see `EditorConfig`).
    pub fn with_config(bytes: &[u8], config_json: &str) -> Result<JsEditSession, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(to_js_error)?;
        let image = io::decode_image(bytes).map_err(to_js_error)?;
        EditSession::with_config(image, &config)
            .map(|inner| Self { inner })
            .map_err(to_js_error)
    }

    /// Start a session on already-decoded pixels.
    pub fn from_buffer(image: &JsRasterBuffer) -> Result<JsEditSession, JsValue> {
        let buffer = image
            .to_raster()
            .ok_or_else(|| JsValue::from_str("pixel data length does not match dimensions"))?;
        EditSession::new(buffer)
            .map(|inner| Self { inner })
            .map_err(to_js_error)
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) -> Result<bool, JsValue> {
        surface(self.inner.begin_drag(Point::new(x, y)))
    }

    /// Move the drag. Returns the provisional
    /// `{ x, y, width, height, circular }` selection, or `null` while the
    /// selection is degenerate.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        match self.inner.update_drag(Point::new(x, y)) {
            Ok(Some(region)) => {
                let circular = region.mask.is_some();
                SelectionJs::from_rect(&region.rect, circular).to_js()
            }
            Ok(None) => Ok(JsValue::NULL),
            Err(err) => surface(Err(err)).map(|_| JsValue::NULL),
        }
    }

    /// Finish the drag and commit the crop. `false` if the selection was
    /// discarded.
    pub fn pointer_up(&mut self, x: i32, y: i32) -> Result<bool, JsValue> {
        surface(self.inner.end_drag(Point::new(x, y)).map(|_| ()))
    }

    pub fn cancel_drag(&mut self) {
        self.inner.cancel_drag();
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        surface(self.inner.undo().map(|_| ()))
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        surface(self.inner.redo().map(|_| ()))
    }

    /// Rotate 90 degrees clockwise.
    pub fn rotate(&mut self) -> Result<bool, JsValue> {
        surface(self.inner.rotate().map(|_| ()))
    }

    /// Select the crop policy by selector index:
    /// 0 = Freeform, 1 = Square, 2 = 16:9, 3 = 4:3, 4 = Circle.
    ///
    /// Returns `false` for an unknown index, leaving the policy unchanged.
    pub fn set_policy(&mut self, index: u8) -> bool {
        match CropPolicy::from_index(index) {
            Some(policy) => {
                self.inner.set_policy(policy);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn policy_label(&self) -> String {
        self.inner.policy().label().to_string()
    }

    /// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
    pub fn set_filter(&mut self, filter: u8) {
        self.inner.set_filter(filter_from_u8(filter));
    }

    /// Change the preview scale (clamped to 10-200 percent).
    pub fn set_preview_scale(&mut self, percent: u32) -> Result<bool, JsValue> {
        surface(self.inner.set_preview_scale(percent).map(|_| ()))
    }

    #[wasm_bindgen(getter)]
    pub fn preview_scale(&self) -> u32 {
        self.inner.preview_scale()
    }

    /// The display-scaled preview, including the live selection outline.
    pub fn preview(&self) -> JsRasterBuffer {
        JsRasterBuffer::from_raster(&self.inner.preview().buffer)
    }

    /// Preview pixels as RGBA for `ImageData`.
    pub fn preview_rgba(&self) -> js_sys::Uint8ClampedArray {
        let rgba = self.preview().to_rgba();
        js_sys::Uint8ClampedArray::from(rgba.as_slice())
    }

    /// Provisional selection in preview coordinates, or `null`.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        let circular = self.inner.policy() == CropPolicy::Circle;
        match &self.inner.preview().overlay {
            Some(rect) => SelectionJs::from_rect(rect, circular).to_js(),
            None => Ok(JsValue::NULL),
        }
    }

    /// The current full-resolution image.
    pub fn working(&self) -> JsRasterBuffer {
        JsRasterBuffer::from_raster(self.inner.working())
    }

    pub fn can_undo(&self) -> bool {
        self.inner.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.history().can_redo()
    }

    /// Number of committed states, including the loaded image.
    pub fn history_len(&self) -> usize {
        self.inner.history().past_len()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Encode the working image (0 = JPEG, 1 = PNG, 2 = BMP).
    pub fn encode(&self, format: u8, quality: u8) -> Result<Vec<u8>, JsValue> {
        let format = format_from_u8(format)
            .ok_or_else(|| JsValue::from_str(&format!("unknown output format: {}", format)))?;
        io::encode_image(self.inner.working(), format, quality).map_err(to_js_error)
    }
}

/// Recoverable errors become a console warning and `false`; the rest are
/// thrown.
fn surface(result: Result<(), EditError>) -> Result<bool, JsValue> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_recoverable() => {
            console::warn_1(&JsValue::from_str(&err.to_string()));
            Ok(false)
        }
        Err(err) => Err(to_js_error(err)),
    }
}
