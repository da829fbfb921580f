//! WASM bindings for the full edit session.
//!
//! One `EditSession` instance per open image: it owns the current raster,
//! gates the edit modes, routes crop pointer events, and runs commits
//! through the in-process pipeline. The front end only renders state and
//! forwards input.

use crate::types::JsRaster;
use retouch_core::editor::{self, EditMode};
use retouch_core::geometry::{DisplayMetrics, Point};
use retouch_core::transform::LocalPipeline;
use retouch_core::{decode, encode};
use wasm_bindgen::prelude::*;

fn parse_mode(name: &str) -> Option<EditMode> {
    match name {
        "crop" => Some(EditMode::Cropping),
        "blur" => Some(EditMode::Blurring),
        "contrast" => Some(EditMode::Contrasting),
        "rotate" => Some(EditMode::Rotating),
        "brightness" => Some(EditMode::Brightening),
        _ => None,
    }
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The edit session wrapper for JavaScript.
#[wasm_bindgen]
pub struct EditSession {
    inner: editor::EditSession,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EditSession {
    /// Create an empty session with no image loaded.
    #[wasm_bindgen(constructor)]
    pub fn new() -> EditSession {
        EditSession {
            inner: editor::EditSession::new(),
        }
    }

    /// Decode image bytes (PNG/JPEG) and adopt the result as the current
    /// raster. Any active mode is abandoned.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let raster = decode::decode_image(bytes).map_err(js_err)?;
        self.inner.load(raster);
        Ok(())
    }

    /// Release the current raster and return to the no-image state.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Native width of the current raster, if an image is loaded.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.inner.current().map(|r| r.width)
    }

    /// Native height of the current raster, if an image is loaded.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.inner.current().map(|r| r.height)
    }

    /// The active mode name: "idle", "crop", "blur", "contrast", "rotate"
    /// or "brightness".
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().label().to_string()
    }

    /// False while a commit is in flight; the front end should disable
    /// sliders and pointer capture.
    #[wasm_bindgen(getter)]
    pub fn input_enabled(&self) -> bool {
        self.inner.input_enabled()
    }

    /// Report the rendered size of the image from the layout.
    pub fn set_display_metrics(&mut self, width: f32, height: f32) {
        self.inner
            .set_display_metrics(DisplayMetrics::new(width, height));
    }

    /// Enter an edit mode by name. Refused (with a user-facing message)
    /// when no image is loaded or another mode is active.
    pub fn enter_mode(&mut self, name: &str) -> Result<(), JsValue> {
        let mode = parse_mode(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown edit mode: {name}")))?;
        self.inner.enter(mode).map_err(js_err)
    }

    /// Abandon the active mode, restoring its parameter defaults.
    pub fn cancel(&mut self) -> Result<(), JsValue> {
        self.inner.cancel().map_err(js_err)
    }

    // ===== Parameter sliders =====

    pub fn set_blur_radius(&mut self, radius: f32) {
        self.inner.set_blur_radius(radius);
    }

    pub fn set_contrast_percent(&mut self, percent: f32) {
        self.inner.set_contrast_percent(percent);
    }

    pub fn set_brightness_percent(&mut self, percent: f32) {
        self.inner.set_brightness_percent(percent);
    }

    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.inner.set_rotation_degrees(degrees);
    }

    /// Current parameter values as a
    /// `{blur_radius, contrast_percent, brightness_percent, rotation_degrees}`
    /// object.
    pub fn params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.params()).map_err(js_err)
    }

    // ===== Crop pointer events =====

    /// Forward a container-relative pointer-down to the crop engine.
    /// Returns `true` if an interaction started.
    pub fn crop_pointer_down(&mut self, x: f32, y: f32) -> bool {
        let point = Point::new(x, y);
        if let Some(crop) = self.inner.crop_editor_mut() {
            if let Some(target) = crop.hit_test(point) {
                crop.pointer_down(point, target);
                return true;
            }
        }
        false
    }

    pub fn crop_pointer_move(&mut self, x: f32, y: f32) {
        if let Some(crop) = self.inner.crop_editor_mut() {
            crop.pointer_move(Point::new(x, y));
        }
    }

    pub fn crop_pointer_up(&mut self) {
        if let Some(crop) = self.inner.crop_editor_mut() {
            crop.pointer_up();
        }
    }

    /// The crop rectangle as a `{x, y, width, height}` object, or
    /// `undefined` when Cropping is not active.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        match self.inner.crop_editor() {
            Some(crop) => serde_wasm_bindgen::to_value(&crop.rect()).map_err(js_err),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    // ===== Commit and export =====

    /// Commit the active edit through the in-process pipeline. On success
    /// the session returns to idle with the new raster current; on failure
    /// the mode stays active and the message is surfaced.
    pub fn commit(&mut self) -> Result<(), JsValue> {
        self.inner.commit(&LocalPipeline).map_err(js_err)
    }

    /// A copy of the current raster for preview rendering.
    pub fn current(&self) -> Option<JsRaster> {
        self.inner
            .current()
            .map(|r| JsRaster::from_raster((*r).clone()))
    }

    /// Encode the current raster to PNG bytes for download.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        let raster = self
            .inner
            .current()
            .ok_or_else(|| JsValue::from_str("no image is loaded"))?;
        encode::encode_png(&raster).map_err(js_err)
    }

    /// Encode the current raster to JPEG bytes with the given quality.
    pub fn export_jpeg(&self, quality: u8) -> Result<Vec<u8>, JsValue> {
        let raster = self
            .inner
            .current()
            .ok_or_else(|| JsValue::from_str("no image is loaded"))?;
        encode::encode_jpeg(&raster, quality).map_err(js_err)
    }
}
