//! Raster cropping.
//!
//! The crop rectangle arrives in display-space units; this module converts
//! it to native pixel coordinates with the mapper's scale factors (floor
//! rounding) and samples the sub-rectangle into a new raster.
//!
//! Rectangles that respect the crop engine's invariants always land inside
//! the raster; the clamping below is robustness for degenerate inputs, not
//! a supported code path.

use crate::geometry::{CropRect, ScaleFactors};
use crate::raster::Raster;

/// Crop a display-space rectangle out of a raster.
///
/// The native sample region is `[x*scale.x, y*scale.y, width*scale.x,
/// height*scale.y]`, each component floor-rounded. The output raster's
/// native dimensions equal the sampled width/height (at least 1x1).
pub fn apply_crop(image: &Raster, rect: &CropRect, scale: ScaleFactors) -> Raster {
    let px_left = (rect.x * scale.x).floor().max(0.0) as u32;
    let px_top = (rect.y * scale.y).floor().max(0.0) as u32;
    let px_width = (rect.width * scale.x).floor() as u32;
    let px_height = (rect.height * scale.y).floor() as u32;

    // Clamp to the raster bounds
    let px_left = px_left.min(image.width.saturating_sub(1));
    let px_top = px_top.min(image.height.saturating_sub(1));
    let px_right = px_left.saturating_add(px_width).min(image.width);
    let px_bottom = px_top.saturating_add(px_height).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let row_bytes = out_width as usize * Raster::CHANNELS;
    let mut output = vec![0u8; out_height as usize * row_bytes];

    // Copy whole rows; pixels within a row are contiguous
    for y in 0..out_height {
        let src_start = image.pixel_offset(px_left, px_top + y);
        let dst_start = y as usize * row_bytes;
        output[dst_start..dst_start + row_bytes]
            .copy_from_slice(&image.pixels[src_start..src_start + row_bytes]);
    }

    Raster::new(out_width, out_height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on
    /// position.
    fn test_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_crop_commit_scenario() {
        // 800x600 native displayed at 400x300 (scale 2,2); display rect
        // {50,50,200,150} samples native region (100,100,400,300).
        let img = test_image(800, 600);
        let rect = CropRect::new(50.0, 50.0, 200.0, 150.0);
        let scale = ScaleFactors { x: 2.0, y: 2.0 };

        let result = apply_crop(&img, &rect, scale);
        assert_eq!(result.width, 400);
        assert_eq!(result.height, 300);

        // First output pixel comes from native (100, 100)
        let expected = ((100 * 800 + 100) % 256) as u8;
        assert_eq!(result.pixels[0], expected);
    }

    #[test]
    fn test_identity_scale_crop() {
        let img = test_image(100, 100);
        let rect = CropRect::new(20.0, 30.0, 50.0, 60.0);

        let result = apply_crop(&img, &rect, ScaleFactors::IDENTITY);
        assert_eq!(result.width, 50);
        assert_eq!(result.height, 60);

        // First pixel from (20, 30)
        let expected = ((30 * 100 + 20) % 256) as u8;
        assert_eq!(result.pixels[0], expected);
    }

    #[test]
    fn test_full_crop_copies_everything() {
        let img = test_image(64, 48);
        let rect = CropRect::new(0.0, 0.0, 64.0, 48.0);

        let result = apply_crop(&img, &rect, ScaleFactors::IDENTITY);
        assert_eq!(result.width, 64);
        assert_eq!(result.height, 48);
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_fractional_coordinates_floor() {
        let img = test_image(100, 100);
        // 10.4 * 1.0 floors to 10; 50.9 floors to 50
        let rect = CropRect::new(10.4, 10.4, 50.9, 50.9);

        let result = apply_crop(&img, &rect, ScaleFactors::IDENTITY);
        assert_eq!(result.width, 50);
        assert_eq!(result.height, 50);
        let expected = ((10 * 100 + 10) % 256) as u8;
        assert_eq!(result.pixels[0], expected);
    }

    #[test]
    fn test_non_uniform_scale() {
        let img = test_image(200, 100);
        // Displayed at 100x100: scale (2, 1)
        let rect = CropRect::new(10.0, 10.0, 50.0, 50.0);
        let scale = ScaleFactors { x: 2.0, y: 1.0 };

        let result = apply_crop(&img, &rect, scale);
        assert_eq!(result.width, 100);
        assert_eq!(result.height, 50);
    }

    #[test]
    fn test_alpha_preserved() {
        let mut img = test_image(10, 10);
        // Distinct alpha at (2, 2)
        let off = img.pixel_offset(2, 2);
        img.pixels[off + 3] = 42;

        let rect = CropRect::new(2.0, 2.0, 5.0, 5.0);
        let result = apply_crop(&img, &rect, ScaleFactors::IDENTITY);
        assert_eq!(result.pixels[3], 42);
    }

    #[test]
    fn test_oversized_rect_clamps_to_bounds() {
        let img = test_image(50, 50);
        let rect = CropRect::new(20.0, 20.0, 500.0, 500.0);

        let result = apply_crop(&img, &rect, ScaleFactors::IDENTITY);
        assert_eq!(result.width, 30);
        assert_eq!(result.height, 30);
    }

    #[test]
    fn test_minimum_output_dimension() {
        let img = test_image(50, 50);
        let rect = CropRect::new(49.5, 49.5, 0.2, 0.2);

        let result = apply_crop(&img, &rect, ScaleFactors::IDENTITY);
        assert!(result.width >= 1);
        assert!(result.height >= 1);
    }

    #[test]
    fn test_crop_does_not_mutate_source() {
        let img = test_image(30, 30);
        let before = img.pixels.clone();
        let rect = CropRect::new(5.0, 5.0, 10.0, 10.0);

        let _ = apply_crop(&img, &rect, ScaleFactors::IDENTITY);
        assert_eq!(img.pixels, before);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
