//! WASM bindings for the one-shot geometric transforms.
//!
//! These run a single validated operation through the local pipeline;
//! whole-session editing (modes, commits, the crop engine) lives in the
//! `session` module.

use crate::types::JsRaster;
use retouch_core::geometry::{CropRect, ScaleFactors};
use retouch_core::transform::{self, Operation};
use wasm_bindgen::prelude::*;

fn run(raster: &JsRaster, op: Operation) -> Result<JsRaster, JsValue> {
    transform::apply_operation(raster.inner(), &op)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop a display-space rectangle out of a raster.
///
/// `scale_x`/`scale_y` are the native/display scale factors reported by
/// the layout (pass 1.0 when the rectangle is already in native pixels).
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Rect measured on a canvas rendered at half size
/// const cropped = apply_crop(raster, 50, 50, 200, 150, 2.0, 2.0);
/// ```
#[wasm_bindgen]
pub fn apply_crop(
    raster: &JsRaster,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    scale_x: f32,
    scale_y: f32,
) -> Result<JsRaster, JsValue> {
    run(
        raster,
        Operation::Crop {
            rect: CropRect::new(x, y, width, height),
            scale: ScaleFactors {
                x: scale_x,
                y: scale_y,
            },
        },
    )
}

/// Rotate a raster about its center, expanding the canvas to fit.
///
/// Positive angles rotate counter-clockwise; the canvas outside the
/// rotated footprint is transparent.
#[wasm_bindgen]
pub fn apply_rotation(raster: &JsRaster, degrees: f64) -> Result<JsRaster, JsValue> {
    run(raster, Operation::Rotate { degrees })
}

/// Apply a gaussian blur of the given radius (0-20 native pixels).
#[wasm_bindgen]
pub fn apply_blur(raster: &JsRaster, radius: f32) -> Result<JsRaster, JsValue> {
    run(raster, Operation::Blur { radius })
}

/// Compute the output dimensions of a rotation without running it.
///
/// Returns `[width, height]`, useful for sizing the preview canvas before
/// the pixel work lands.
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> Vec<u32> {
    let (w, h) = transform::rotated_bounds(width, height, degrees);
    vec![w, h]
}
