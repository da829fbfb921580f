//! Raster export: encode the current raster to an image byte stream.
//!
//! PNG is the primary export path (keeps alpha, lossless); JPEG is
//! provided for opaque exports with a quality knob, dropping alpha.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::raster::Raster;

/// Errors that can occur during raster encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the raster dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

fn validate(raster: &Raster) -> Result<(), EncodeError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: raster.width,
            height: raster.height,
        });
    }
    let expected = raster.width as usize * raster.height as usize * Raster::CHANNELS;
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }
    Ok(())
}

/// Encode a raster to PNG bytes, preserving alpha.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    validate(raster)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a raster to JPEG bytes with the given quality (1-100).
///
/// JPEG has no alpha channel; transparency is dropped.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(raster)?;

    let quality = quality.clamp(1, 100);

    // Strip alpha down to RGB
    let mut rgb = Vec::with_capacity(raster.pixel_count() as usize * 3);
    for chunk in raster.pixels.chunks_exact(Raster::CHANNELS) {
        rgb.extend_from_slice(&chunk[..3]);
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&rgb, raster.width, raster.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
