//! The raster transform pipeline: (raster, operation, params) -> new raster.
//!
//! Every operation is a pure function. For a fixed input raster and
//! parameter set the output is byte-identical across invocations, which the
//! commit path and the tests rely on.
//!
//! Parameter ranges are validated here before any pixel work runs; an
//! out-of-range scalar reaching this layer is a programming defect upstream
//! (the sliders clamp), surfaced as [`TransformError::InvalidParameter`].

mod adjust;
mod blur;
mod crop;
mod rotate;

pub use adjust::{apply_brightness, apply_contrast};
pub use blur::apply_blur;
pub use crop::apply_crop;
pub use rotate::{apply_rotation, rotated_bounds};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{CropRect, ScaleFactors};
use crate::raster::Raster;

/// Maximum blur radius in native pixels.
pub const BLUR_RADIUS_MAX: f32 = 20.0;
/// Maximum contrast/brightness percentage (100 = identity).
pub const PERCENT_MAX: f32 = 200.0;
/// Maximum rotation magnitude in degrees.
pub const ROTATION_DEGREES_MAX: f64 = 360.0;

/// One committed edit operation with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Sample the display-space rectangle out of the raster, converting to
    /// native pixels with the given scale factors.
    Crop { rect: CropRect, scale: ScaleFactors },
    /// Gaussian low-pass blur over the full raster.
    Blur { radius: f32 },
    /// Linear contrast remap about the channel midpoint.
    Contrast { percent: f32 },
    /// Linear brightness remap.
    Brightness { percent: f32 },
    /// Rotate about the center, expanding the canvas to the rotated
    /// bounding box.
    Rotate { degrees: f64 },
}

impl Operation {
    /// Short operation name for logs and error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Crop { .. } => "crop",
            Operation::Blur { .. } => "blur",
            Operation::Contrast { .. } => "contrast",
            Operation::Brightness { .. } => "brightness",
            Operation::Rotate { .. } => "rotate",
        }
    }
}

/// Failure conditions of the transform pipeline.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A scalar parameter is outside its declared range.
    #[error("parameter {name} out of range: {value} (expected {min} to {max})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The source raster handle no longer resolves to valid pixel data.
    #[error("source raster is no longer available")]
    SourceUnavailable,

    /// The underlying pixel operation could not produce output.
    #[error("transform failed: {0}")]
    TransformFailed(String),
}

fn check_range(
    name: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), TransformError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(TransformError::InvalidParameter {
            name,
            value,
            min,
            max,
        })
    }
}

/// Validate an operation's parameters against their declared ranges.
pub fn validate_operation(op: &Operation) -> Result<(), TransformError> {
    match op {
        Operation::Crop { .. } => Ok(()),
        Operation::Blur { radius } => {
            check_range("blur_radius", *radius as f64, 0.0, BLUR_RADIUS_MAX as f64)
        }
        Operation::Contrast { percent } => {
            check_range("contrast_percent", *percent as f64, 0.0, PERCENT_MAX as f64)
        }
        Operation::Brightness { percent } => check_range(
            "brightness_percent",
            *percent as f64,
            0.0,
            PERCENT_MAX as f64,
        ),
        Operation::Rotate { degrees } => check_range(
            "rotation_degrees",
            *degrees,
            -ROTATION_DEGREES_MAX,
            ROTATION_DEGREES_MAX,
        ),
    }
}

/// Apply one operation to a source raster, producing a new raster.
///
/// The source is never mutated. Deterministic: identical inputs yield
/// byte-identical outputs.
pub fn apply_operation(source: &Raster, op: &Operation) -> Result<Raster, TransformError> {
    validate_operation(op)?;

    if source.is_empty() {
        return Err(TransformError::SourceUnavailable);
    }

    match op {
        Operation::Crop { rect, scale } => Ok(crop::apply_crop(source, rect, *scale)),
        Operation::Blur { radius } => Ok(blur::apply_blur(source, *radius)),
        Operation::Contrast { percent } => Ok(adjust::apply_contrast(source, *percent)),
        Operation::Brightness { percent } => Ok(adjust::apply_brightness(source, *percent)),
        Operation::Rotate { degrees } => {
            let (w, h) = rotate::rotated_bounds(source.width, source.height, *degrees);
            // Guard the output allocation before the per-pixel work starts.
            (w as usize)
                .checked_mul(h as usize)
                .and_then(|n| n.checked_mul(Raster::CHANNELS))
                .ok_or_else(|| {
                    TransformError::TransformFailed(format!(
                        "rotated canvas {}x{} exceeds addressable memory",
                        w, h
                    ))
                })?;
            Ok(rotate::apply_rotation(source, *degrees))
        }
    }
}

/// A substitutable implementation of the transform pipeline contract.
///
/// [`LocalPipeline`] computes in-process; a remote processing backend that
/// accepts an encoded raster plus operation parameters over a
/// request/response boundary implements the same trait, and the edit
/// session cannot tell the two apart.
pub trait TransformPipeline {
    fn apply(&self, source: &Raster, op: &Operation) -> Result<Raster, TransformError>;
}

/// The in-process transform pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPipeline;

impl TransformPipeline for LocalPipeline {
    fn apply(&self, source: &Raster, op: &Operation) -> Result<Raster, TransformError> {
        apply_operation(source, op)
    }
}
