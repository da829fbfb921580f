//! Gaussian low-pass blur.
//!
//! Separable implementation: a 1D kernel applied horizontally into an f32
//! working buffer, then vertically back to bytes. The kernel uses
//! `sigma = radius` truncated at three standard deviations, matching the
//! usual "blur radius" slider semantics. Samples past the image edge clamp
//! to the border pixel.
//!
//! All four channels are filtered; output dimensions are unchanged. A
//! radius of zero returns a byte-identical copy.

use crate::raster::Raster;

/// Build a normalized 1D gaussian kernel.
fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Apply a gaussian blur of the given radius over the full raster.
pub fn apply_blur(image: &Raster, radius: f32) -> Raster {
    if radius <= 0.0 {
        return image.clone();
    }

    let half = (radius * 3.0).ceil().max(1.0) as i64;
    let kernel = gaussian_kernel_1d((2 * half + 1) as usize, radius);

    let width = image.width as i64;
    let height = image.height as i64;
    let channels = Raster::CHANNELS;

    // Horizontal pass into an f32 working buffer
    let mut horizontal = vec![0.0f32; image.pixels.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = (x + k as i64 - half).clamp(0, width - 1);
                let idx = (y * width + sx) as usize * channels;
                for c in 0..channels {
                    acc[c] += image.pixels[idx + c] as f32 * weight;
                }
            }
            let out_idx = (y * width + x) as usize * channels;
            horizontal[out_idx..out_idx + channels].copy_from_slice(&acc);
        }
    }

    // Vertical pass back to bytes
    let mut output = vec![0u8; image.pixels.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = (y + k as i64 - half).clamp(0, height - 1);
                let idx = (sy * width + x) as usize * channels;
                for c in 0..channels {
                    acc[c] += horizontal[idx + c] * weight;
                }
            }
            let out_idx = (y * width + x) as usize * channels;
            for c in 0..channels {
                output[out_idx + c] = acc[c].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    Raster::new(image.width, image.height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
