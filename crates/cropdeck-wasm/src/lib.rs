//! Cropdeck WASM - WebAssembly bindings for the Cropdeck edit session
//!
//! This crate exposes cropdeck-core to a browser front end, which acts as
//! the presentation layer: it owns the canvas and widgets and forwards
//! pointer events and button presses to a [`JsEditSession`].
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `codec` - Decoding and encoding bindings
//! - `session` - Interactive edit session with undo/redo
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@cropdeck/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession(new Uint8Array(await file.arrayBuffer()));
//! session.pointer_down(10, 10);
//! session.pointer_up(90, 90);
//! const jpeg = session.encode(0, 90);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod session;
mod types;

pub use codec::{decode_image, encode_image, encode_jpeg};
pub use session::JsEditSession;
pub use types::JsRasterBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
