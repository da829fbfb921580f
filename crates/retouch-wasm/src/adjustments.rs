//! WASM bindings for the photometric adjustments.
//!
//! Contrast and brightness are linear percentage remaps where 100 is the
//! identity; both leave the alpha channel untouched.

use crate::types::JsRaster;
use retouch_core::transform::{self, Operation};
use wasm_bindgen::prelude::*;

/// Apply a linear contrast remap about the channel midpoint.
///
/// `percent` ranges 0-200; 100 is the identity, 0 flattens to mid-gray,
/// 200 doubles the distance from the midpoint.
#[wasm_bindgen]
pub fn apply_contrast(raster: &JsRaster, percent: f32) -> Result<JsRaster, JsValue> {
    transform::apply_operation(raster.inner(), &Operation::Contrast { percent })
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply a linear brightness remap.
///
/// `percent` ranges 0-200; 100 is the identity, 0 is black, 200 doubles
/// every channel (clamped at white).
#[wasm_bindgen]
pub fn apply_brightness(raster: &JsRaster, percent: f32) -> Result<JsRaster, JsValue> {
    transform::apply_operation(raster.inner(), &Operation::Brightness { percent })
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
