//! Retouch WASM - WebAssembly bindings for the Retouch editing engine
//!
//! This crate exposes the retouch-core functionality to JavaScript/
//! TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for raster data
//! - `decode` - Image decoding bindings (PNG/JPEG ingest)
//! - `encode` - Image encoding bindings (PNG/JPEG export)
//! - `transform` - One-shot transform bindings (crop, rotate, blur)
//! - `adjustments` - Photometric adjustment bindings (contrast, brightness)
//! - `crop_editor` - The interactive crop rectangle engine
//! - `session` - The full edit session (modes, parameters, commits)
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new EditSession();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! session.load(bytes);
//! session.enter_mode('brightness');
//! session.set_brightness_percent(130);
//! session.commit();
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod crop_editor;
mod decode;
mod encode;
mod session;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{apply_brightness, apply_contrast};
pub use crop_editor::CropEditor;
pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use session::EditSession;
pub use transform::{apply_blur, apply_crop, apply_rotation, rotated_bounds};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
