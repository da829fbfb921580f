//! Interactive geometry: coordinate mapping and the crop rectangle engine.
//!
//! Everything in this module works in *display space* - the coordinate
//! system of the rendered image on screen. The transform pipeline converts
//! display-space rectangles to native pixel coordinates via [`ScaleFactors`]
//! at commit time.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the rendered image
//! - x grows right, y grows down
//! - Display units may differ from native pixels when the layout scales
//!   the image

mod crop;
mod mapper;

pub use crop::{
    CropEditor, CropRect, DragState, Handle, HitTarget, HANDLE_HIT_RADIUS, MIN_CROP_SIZE,
};
pub use mapper::{
    scale_factors, to_local, DisplayMetrics, Point, PointerEvent, ScaleFactors, SurfaceBounds,
};
