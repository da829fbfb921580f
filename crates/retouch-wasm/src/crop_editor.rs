//! WASM bindings for the interactive crop rectangle engine.
//!
//! The front end forwards container-relative pointer events; hit-testing,
//! drag/resize arithmetic and clamping all run in the core engine so mouse
//! and touch behave identically.

use retouch_core::geometry::{self, DisplayMetrics, Point};
use wasm_bindgen::prelude::*;

/// Interactive crop rectangle editor for JavaScript.
#[wasm_bindgen]
pub struct CropEditor {
    inner: geometry::CropEditor,
}

#[wasm_bindgen]
impl CropEditor {
    /// Create an editor for a rendered image of the given display size,
    /// with the default centered rectangle.
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: f32, container_height: f32) -> CropEditor {
        CropEditor {
            inner: geometry::CropEditor::new(DisplayMetrics::new(
                container_width,
                container_height,
            )),
        }
    }

    /// Begin an interaction at a container-relative point.
    ///
    /// Hit-tests handles before the body (a corner hit never starts a
    /// body drag). Returns `true` if an interaction started.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        let point = Point::new(x, y);
        match self.inner.hit_test(point) {
            Some(target) => {
                self.inner.pointer_down(point, target);
                true
            }
            None => false,
        }
    }

    /// Advance the active interaction to a container-relative point.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.inner.pointer_move(Point::new(x, y));
    }

    /// End the active interaction.
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    /// Adopt a new container size after a viewport change.
    pub fn set_container(&mut self, width: f32, height: f32) {
        self.inner.set_container(DisplayMetrics::new(width, height));
    }

    /// Reset to the default centered rectangle.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// The current rectangle as a `{x, y, width, height}` object.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.rect()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Rectangle left edge in display units.
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f32 {
        self.inner.rect().x
    }

    /// Rectangle top edge in display units.
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f32 {
        self.inner.rect().y
    }

    /// Rectangle width in display units.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.inner.rect().width
    }

    /// Rectangle height in display units.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.inner.rect().height
    }

    /// Whether a drag or resize is currently active.
    #[wasm_bindgen(getter)]
    pub fn interacting(&self) -> bool {
        !matches!(self.inner.interaction(), geometry::DragState::None)
    }
}
