//! Image encoding WASM bindings.
//!
//! Export path for the front end: the current raster out to PNG (alpha
//! preserved) or JPEG (quality knob, alpha dropped) bytes ready for a
//! download or upload.

use crate::types::JsRaster;
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a raster to PNG bytes, preserving alpha.
///
/// # Example
///
/// ```typescript
/// const png = encode_png(raster);
/// const blob = new Blob([png], { type: 'image/png' });
/// ```
#[wasm_bindgen]
pub fn encode_png(raster: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(raster.inner()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a raster to JPEG bytes with the given quality (1-100).
///
/// JPEG has no alpha channel; transparency is dropped.
#[wasm_bindgen]
pub fn encode_jpeg(raster: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(raster.inner(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
