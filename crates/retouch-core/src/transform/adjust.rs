//! Photometric adjustments: contrast and brightness.
//!
//! Both are per-pixel linear remaps on the color channels, expressed as a
//! percentage where 100 is the identity. Alpha is carried through
//! untouched.
//!
//! Formulas:
//! - contrast:   `out = (in - 128) * (percent / 100) + 128`
//! - brightness: `out = in * (percent / 100)`
//!
//! Results are clamped to the channel range and rounded.

use crate::raster::Raster;

/// Apply a linear contrast remap about the channel midpoint.
pub fn apply_contrast(image: &Raster, percent: f32) -> Raster {
    if percent == 100.0 {
        return image.clone();
    }
    let factor = percent / 100.0;
    remap_color_channels(image, |v| (v - 128.0) * factor + 128.0)
}

/// Apply a linear brightness remap.
pub fn apply_brightness(image: &Raster, percent: f32) -> Raster {
    if percent == 100.0 {
        return image.clone();
    }
    let factor = percent / 100.0;
    remap_color_channels(image, |v| v * factor)
}

/// Run a scalar remap over R, G and B, leaving alpha untouched.
fn remap_color_channels(image: &Raster, f: impl Fn(f32) -> f32) -> Raster {
    let mut output = image.pixels.clone();
    for chunk in output.chunks_exact_mut(Raster::CHANNELS) {
        for channel in chunk.iter_mut().take(3) {
            *channel = f(*channel as f32).clamp(0.0, 255.0).round() as u8;
        }
    }
    Raster::new(image.width, image.height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a single-pixel raster.
    fn pixel(r: u8, g: u8, b: u8, a: u8) -> Raster {
        Raster::new(1, 1, vec![r, g, b, a])
    }

    // ===== Identity Tests =====

    #[test]
    fn test_contrast_identity() {
        let img = pixel(64, 128, 192, 200);
        let result = apply_contrast(&img, 100.0);
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_brightness_identity() {
        let img = pixel(64, 128, 192, 200);
        let result = apply_brightness(&img, 100.0);
        assert_eq!(result.pixels, img.pixels);
    }

    // ===== Contrast Tests =====

    #[test]
    fn test_contrast_doubles_distance_from_midpoint() {
        let img = pixel(78, 128, 178, 255);
        let result = apply_contrast(&img, 200.0);
        // (78-128)*2+128 = 28; 128 stays; (178-128)*2+128 = 228
        assert_eq!(&result.pixels[..3], &[28, 128, 228]);
    }

    #[test]
    fn test_contrast_zero_flattens_to_midpoint() {
        let img = pixel(0, 100, 255, 255);
        let result = apply_contrast(&img, 0.0);
        assert_eq!(&result.pixels[..3], &[128, 128, 128]);
    }

    #[test]
    fn test_contrast_clamps_at_extremes() {
        let img = pixel(10, 128, 245, 255);
        let result = apply_contrast(&img, 200.0);
        assert_eq!(result.pixels[0], 0, "dark channel clamps at 0");
        assert_eq!(result.pixels[2], 255, "bright channel clamps at 255");
    }

    #[test]
    fn test_contrast_leaves_alpha_untouched() {
        let img = pixel(30, 60, 90, 77);
        let result = apply_contrast(&img, 180.0);
        assert_eq!(result.pixels[3], 77);
    }

    // ===== Brightness Tests =====

    #[test]
    fn test_brightness_half() {
        let img = pixel(200, 100, 50, 255);
        let result = apply_brightness(&img, 50.0);
        assert_eq!(&result.pixels[..3], &[100, 50, 25]);
    }

    #[test]
    fn test_brightness_zero_is_black() {
        let img = pixel(200, 100, 50, 255);
        let result = apply_brightness(&img, 0.0);
        assert_eq!(&result.pixels[..3], &[0, 0, 0]);
    }

    #[test]
    fn test_brightness_clamps_at_white() {
        let img = pixel(200, 200, 200, 255);
        let result = apply_brightness(&img, 200.0);
        assert_eq!(&result.pixels[..3], &[255, 255, 255]);
    }

    #[test]
    fn test_brightness_leaves_alpha_untouched() {
        let img = pixel(200, 100, 50, 13);
        let result = apply_brightness(&img, 150.0);
        assert_eq!(result.pixels[3], 13);
    }

    // ===== Multi-pixel and misc =====

    #[test]
    fn test_remap_covers_all_pixels() {
        let mut pixels = Vec::new();
        for v in [0u8, 64, 128, 192, 255] {
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
        let img = Raster::new(5, 1, pixels);
        let result = apply_brightness(&img, 50.0);

        assert_eq!(result.pixels[0], 0);
        assert_eq!(result.pixels[4], 32);
        assert_eq!(result.pixels[8], 64);
        assert_eq!(result.pixels[12], 96);
        assert_eq!(result.pixels[16], 128);
    }

    #[test]
    fn test_adjustments_are_deterministic() {
        let img = pixel(91, 33, 187, 201);
        assert_eq!(
            apply_contrast(&img, 137.0).pixels,
            apply_contrast(&img, 137.0).pixels
        );
        assert_eq!(
            apply_brightness(&img, 62.0).pixels,
            apply_brightness(&img, 62.0).pixels
        );
    }

    #[test]
    fn test_adjustments_do_not_mutate_source() {
        let img = pixel(91, 33, 187, 201);
        let before = img.pixels.clone();
        let _ = apply_contrast(&img, 150.0);
        let _ = apply_brightness(&img, 150.0);
        assert_eq!(img.pixels, before);
    }
}
