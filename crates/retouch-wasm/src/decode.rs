//! Image decoding WASM bindings.
//!
//! Exposes the retouch-core ingestion path to JavaScript: encoded bytes in,
//! an editable [`JsRaster`] out.

use crate::types::JsRaster;
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// Accepts PNG and JPEG data and automatically applies EXIF orientation
/// correction so the image arrives upright.
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
///
/// # Errors
///
/// Returns an error if the bytes are not a recognized image format or the
/// file is corrupted or truncated.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const raster = decode_image(bytes);
/// console.log(`Decoded ${raster.width}x${raster.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::{encode, Raster};

    fn png_fixture() -> Vec<u8> {
        let raster = Raster::new(6, 4, vec![200u8; 6 * 4 * 4]);
        encode::encode_png(&raster).expect("png encoding")
    }

    #[test]
    fn test_decode_png_fixture() {
        let raster = decode_image(&png_fixture()).expect("valid png");
        assert_eq!(raster.width(), 6);
        assert_eq!(raster.height(), 4);
    }
}
