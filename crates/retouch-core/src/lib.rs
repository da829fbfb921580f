//! Retouch Core - Interactive raster editing engine
//!
//! This crate provides the core functionality for Retouch: decoding an image
//! into an editable raster, an interactive crop-geometry engine, a
//! deterministic raster transform pipeline (crop, rotate, blur, contrast,
//! brightness), and the edit session that coordinates modes, parameters and
//! ownership of the current raster.

pub mod decode;
pub mod editor;
pub mod encode;
pub mod geometry;
pub mod raster;
pub mod transform;

pub use editor::{CommitRequest, EditError, EditMode, EditSession};
pub use geometry::{scale_factors, CropEditor, CropRect, DisplayMetrics, Point};
pub use raster::Raster;
pub use transform::{apply_operation, LocalPipeline, Operation, TransformError, TransformPipeline};

/// Resting value of the blur slider when Blurring mode is entered.
///
/// Unlike the other parameters this is not the identity value (radius 0);
/// the slider rests at a visible amount so entering the mode shows an
/// immediate preview.
pub const DEFAULT_BLUR_RADIUS: f32 = 5.0;

/// One scalar parameter per photometric/rotation edit mode.
///
/// Each value is only meaningful while its mode is active and is reset to
/// its documented default when the mode is cancelled or committed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterParams {
    /// Gaussian blur radius in native pixels (0 to 20).
    pub blur_radius: f32,
    /// Contrast percentage (0 to 200, 100 = identity).
    pub contrast_percent: f32,
    /// Brightness percentage (0 to 200, 100 = identity).
    pub brightness_percent: f32,
    /// Rotation angle in degrees (-360 to 360, positive = counter-clockwise).
    pub rotation_degrees: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            blur_radius: DEFAULT_BLUR_RADIUS,
            contrast_percent: 100.0,
            brightness_percent: 100.0,
            rotation_degrees: 0.0,
        }
    }
}

impl FilterParams {
    /// Create a new FilterParams with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_params_default() {
        let params = FilterParams::new();
        assert!(params.is_default());
        assert_eq!(params.blur_radius, DEFAULT_BLUR_RADIUS);
        assert_eq!(params.contrast_percent, 100.0);
        assert_eq!(params.brightness_percent, 100.0);
        assert_eq!(params.rotation_degrees, 0.0);
    }

    #[test]
    fn test_filter_params_not_default() {
        let mut params = FilterParams::new();
        params.rotation_degrees = 90.0;
        assert!(!params.is_default());
    }
}
