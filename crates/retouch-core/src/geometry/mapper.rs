//! Coordinate mapping between pointer events, the display surface and
//! native pixel space.
//!
//! Two jobs live here: translating an absolute pointer position into
//! coordinates relative to the rendered image, and computing the per-axis
//! scale between the image's native dimensions and the size it is actually
//! rendered at. The crop engine consumes the first; the transform pipeline
//! consumes the second when it converts a display-space crop rectangle into
//! a native-space sample region.

use serde::{Deserialize, Serialize};

/// A point in display-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Absolute bounds of the rendering surface in the host's client space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceBounds {
    /// Left edge of the surface in client coordinates.
    pub left: f32,
    /// Top edge of the surface in client coordinates.
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Rendered size of the current raster, supplied by the rendering surface.
///
/// May differ from the raster's native dimensions due to layout scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub width: f32,
    pub height: f32,
}

impl DisplayMetrics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero-size metric is degenerate and maps to identity scaling.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Per-axis ratio between native pixels and display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub x: f32,
    pub y: f32,
}

impl ScaleFactors {
    /// Identity scaling (display units equal native pixels).
    pub const IDENTITY: ScaleFactors = ScaleFactors { x: 1.0, y: 1.0 };
}

/// A normalized pointer event from any input source.
///
/// Mouse and touch both funnel through this type so the crop engine sees a
/// single event shape. Multi-touch carries the full contact list; only the
/// primary (first) contact drives the interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// A single-point mouse event at an absolute client position.
    Mouse { client: Point },
    /// A touch event with one or more contact points.
    Touch { contacts: Vec<Point> },
}

impl PointerEvent {
    /// The primary contact position: the mouse position, or the first touch.
    ///
    /// Returns `None` only for a touch event with an empty contact list
    /// (e.g. the final touchend of a gesture).
    pub fn primary_position(&self) -> Option<Point> {
        match self {
            PointerEvent::Mouse { client } => Some(*client),
            PointerEvent::Touch { contacts } => contacts.first().copied(),
        }
    }
}

/// Convert a pointer event's absolute position into surface-relative
/// coordinates by subtracting the surface's top-left origin.
///
/// Returns `None` when the event carries no usable contact point.
pub fn to_local(event: &PointerEvent, surface: SurfaceBounds) -> Option<Point> {
    let client = event.primary_position()?;
    Some(Point::new(client.x - surface.left, client.y - surface.top))
}

/// Compute the per-axis native/display scale for the current raster.
///
/// Returns identity scaling when the display metrics are degenerate (zero
/// on either axis), guarding against division by zero.
pub fn scale_factors(native_width: u32, native_height: u32, metrics: DisplayMetrics) -> ScaleFactors {
    if metrics.is_degenerate() {
        return ScaleFactors::IDENTITY;
    }
    ScaleFactors {
        x: native_width as f32 / metrics.width,
        y: native_height as f32 / metrics.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_to_local() {
        let event = PointerEvent::Mouse {
            client: Point::new(150.0, 90.0),
        };
        let surface = SurfaceBounds {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 300.0,
        };

        let local = to_local(&event, surface).expect("mouse always has a position");
        assert_eq!(local, Point::new(50.0, 40.0));
    }

    #[test]
    fn test_touch_uses_primary_contact() {
        let event = PointerEvent::Touch {
            contacts: vec![Point::new(30.0, 20.0), Point::new(200.0, 200.0)],
        };
        let surface = SurfaceBounds {
            left: 10.0,
            top: 10.0,
            width: 400.0,
            height: 300.0,
        };

        let local = to_local(&event, surface).expect("first contact selected");
        assert_eq!(local, Point::new(20.0, 10.0));
    }

    #[test]
    fn test_empty_touch_has_no_position() {
        let event = PointerEvent::Touch { contacts: vec![] };
        assert_eq!(event.primary_position(), None);
        assert_eq!(to_local(&event, SurfaceBounds::default()), None);
    }

    #[test]
    fn test_scale_factors() {
        // 800x600 native shown at 400x300 -> scale (2, 2)
        let scale = scale_factors(800, 600, DisplayMetrics::new(400.0, 300.0));
        assert_eq!(scale.x, 2.0);
        assert_eq!(scale.y, 2.0);
    }

    #[test]
    fn test_scale_factors_non_uniform() {
        let scale = scale_factors(1000, 300, DisplayMetrics::new(500.0, 300.0));
        assert_eq!(scale.x, 2.0);
        assert_eq!(scale.y, 1.0);
    }

    #[test]
    fn test_degenerate_metrics_give_identity() {
        let scale = scale_factors(800, 600, DisplayMetrics::new(0.0, 300.0));
        assert_eq!(scale, ScaleFactors::IDENTITY);

        let scale = scale_factors(800, 600, DisplayMetrics::default());
        assert_eq!(scale, ScaleFactors::IDENTITY);
    }
}
