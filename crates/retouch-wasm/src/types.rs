//! WASM-compatible wrapper types for raster data.
//!
//! [`JsRaster`] wraps the core `Raster` type and provides a JavaScript-
//! friendly interface for accessing image dimensions and pixel data.
//!
//! # Memory Management
//!
//! Pixel data lives in WASM memory. Calling `pixels()` copies it out to a
//! JavaScript `Uint8Array`; keep the raster in WASM memory and extract
//! pixels only when the canvas actually needs them. `free()` releases WASM
//! memory immediately, though wasm-bindgen's finalizer handles cleanup
//! automatically.

use retouch_core::Raster;
use wasm_bindgen::prelude::*;

/// A raster wrapper for JavaScript.
#[wasm_bindgen]
pub struct JsRaster {
    inner: Raster,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and RGBA pixel data
    /// (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            inner: Raster::new(width, height, pixels),
        }
    }

    /// Get the image width in native pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in native pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGBA pixel data as a Uint8Array (copies out of WASM memory).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    /// Wrap a core raster.
    pub(crate) fn from_raster(inner: Raster) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped core raster.
    pub(crate) fn inner(&self) -> &Raster {
        &self.inner
    }
}
