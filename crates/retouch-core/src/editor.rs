//! The edit session: mode state machine, parameter state and ownership of
//! the current raster.
//!
//! At most one edit mode is active at a time, and the only legal
//! transitions are Idle -> mode (guarded by image presence) and mode ->
//! Idle via cancel or commit. Parameter sliders and the crop engine only
//! mutate state while their mode is active; everything resets to its
//! documented default when the mode exits.
//!
//! # Commit flow
//!
//! Commits are two-phase so the pixel work can run off the interactive
//! thread: [`EditSession::begin_commit`] snapshots the operation and a weak
//! handle to the source raster and disables further input;
//! [`EditSession::finish_commit`] adopts the result. At most one commit is
//! in flight, a pending commit cannot be cancelled, and a failed commit
//! leaves the mode active with input re-enabled. Failures are never
//! retried automatically - a deterministic transform recomputed from
//! unchanged inputs fails the same way.

use std::fmt;
use std::sync::{Arc, Weak};

use thiserror::Error;

use crate::geometry::{scale_factors, CropEditor, DisplayMetrics};
use crate::raster::Raster;
use crate::transform::{Operation, TransformError, TransformPipeline};
use crate::FilterParams;

/// The mutually exclusive edit modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum EditMode {
    #[default]
    Idle,
    Cropping,
    Blurring,
    Contrasting,
    Rotating,
    Brightening,
}

impl EditMode {
    pub fn is_idle(self) -> bool {
        self == EditMode::Idle
    }

    /// User-facing operation name for advisories.
    pub fn label(self) -> &'static str {
        match self {
            EditMode::Idle => "idle",
            EditMode::Cropping => "crop",
            EditMode::Blurring => "blur",
            EditMode::Contrasting => "contrast",
            EditMode::Rotating => "rotate",
            EditMode::Brightening => "brightness",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session-level failures.
///
/// [`EditError::NoImage`] is the only condition expected in normal
/// operation; it is an advisory, not a fault.
#[derive(Debug, Error)]
pub enum EditError {
    /// A mode was requested with no image loaded.
    #[error("cannot start {requested}: no image is loaded")]
    NoImage { requested: EditMode },

    /// A mode was requested while another mode is active.
    #[error("cannot start {requested}: {active} is still active")]
    ModeActive {
        active: EditMode,
        requested: EditMode,
    },

    /// A commit is already in flight.
    #[error("a commit is already in progress")]
    CommitPending,

    /// Commit was requested with no active edit mode.
    #[error("no active edit to commit")]
    NoActiveEdit,

    /// The transform pipeline failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// A snapshot of one commit: the operation plus a weak handle to the
/// source raster.
///
/// The handle is weak on purpose: if the session's image is cleared while
/// the commit is in flight, execution surfaces `SourceUnavailable` instead
/// of silently keeping the released raster alive.
#[derive(Debug, Clone)]
pub struct CommitRequest {
    operation: Operation,
    source: Weak<Raster>,
}

impl CommitRequest {
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Run the request against a pipeline implementation.
    pub fn execute(&self, pipeline: &dyn TransformPipeline) -> Result<Raster, TransformError> {
        let source = self
            .source
            .upgrade()
            .ok_or(TransformError::SourceUnavailable)?;
        pipeline.apply(&source, &self.operation)
    }
}

/// Owner of the current raster and coordinator of the edit modes.
#[derive(Debug, Default)]
pub struct EditSession {
    raster: Option<Arc<Raster>>,
    display: DisplayMetrics,
    mode: EditMode,
    params: FilterParams,
    crop: Option<CropEditor>,
    commit_pending: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Resource lifecycle =====

    /// Adopt a new image as the current raster.
    ///
    /// Any active mode is abandoned and its state reset; the previous
    /// raster's storage is released once no in-flight preview still holds
    /// a handle. Display metrics default to the native dimensions until
    /// the rendering surface reports actual values.
    pub fn load(&mut self, raster: Raster) {
        self.display = DisplayMetrics::new(raster.width as f32, raster.height as f32);
        self.raster = Some(Arc::new(raster));
        self.reset_edit_state();
    }

    /// Release the current raster and return to the no-image state.
    pub fn clear(&mut self) {
        self.raster = None;
        self.display = DisplayMetrics::default();
        self.reset_edit_state();
    }

    /// Handle to the current raster, for display or export.
    pub fn current(&self) -> Option<Arc<Raster>> {
        self.raster.clone()
    }

    pub fn has_image(&self) -> bool {
        self.raster.is_some()
    }

    // ===== Display surface =====

    /// Adopt new display metrics from the rendering surface.
    pub fn set_display_metrics(&mut self, metrics: DisplayMetrics) {
        self.display = metrics;
        if let Some(crop) = &mut self.crop {
            crop.set_container(metrics);
        }
    }

    pub fn display_metrics(&self) -> DisplayMetrics {
        self.display
    }

    // ===== Mode state machine =====

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Pointer and slider input is disabled while a commit is in flight.
    pub fn input_enabled(&self) -> bool {
        !self.commit_pending
    }

    /// The crop engine, present only while Cropping is active.
    pub fn crop_editor(&self) -> Option<&CropEditor> {
        self.crop.as_ref()
    }

    /// Mutable crop engine access for routing pointer events. `None` when
    /// not cropping or while a commit is pending.
    pub fn crop_editor_mut(&mut self) -> Option<&mut CropEditor> {
        if self.commit_pending {
            return None;
        }
        self.crop.as_mut()
    }

    /// Enter an edit mode from Idle.
    ///
    /// Requires an image; refusal is an advisory naming the attempted
    /// operation. Requesting `Idle` is a no-op (leave via cancel/commit).
    pub fn enter(&mut self, mode: EditMode) -> Result<(), EditError> {
        if mode.is_idle() {
            return Ok(());
        }
        if self.commit_pending {
            return Err(EditError::CommitPending);
        }
        if !self.mode.is_idle() {
            return Err(EditError::ModeActive {
                active: self.mode,
                requested: mode,
            });
        }
        if !self.has_image() {
            log::debug!("refused {} entry: no image loaded", mode);
            return Err(EditError::NoImage { requested: mode });
        }

        self.mode = mode;
        self.params = FilterParams::default();
        if mode == EditMode::Cropping {
            self.crop = Some(CropEditor::new(self.display));
        }
        Ok(())
    }

    /// Abandon the active mode, restoring its defaults. The raster is
    /// never touched. Rejected while a commit is pending: a dispatched
    /// commit runs to completion or failure.
    pub fn cancel(&mut self) -> Result<(), EditError> {
        if self.commit_pending {
            return Err(EditError::CommitPending);
        }
        self.reset_edit_state();
        Ok(())
    }

    // ===== Parameter sliders =====
    //
    // Each setter only applies while its mode is active and input is
    // enabled; values clamp to their declared range so the pipeline's
    // validation can never fire from slider input.

    pub fn set_blur_radius(&mut self, radius: f32) {
        if self.mode == EditMode::Blurring && self.input_enabled() {
            self.params.blur_radius = radius.clamp(0.0, crate::transform::BLUR_RADIUS_MAX);
        }
    }

    pub fn set_contrast_percent(&mut self, percent: f32) {
        if self.mode == EditMode::Contrasting && self.input_enabled() {
            self.params.contrast_percent = percent.clamp(0.0, crate::transform::PERCENT_MAX);
        }
    }

    pub fn set_brightness_percent(&mut self, percent: f32) {
        if self.mode == EditMode::Brightening && self.input_enabled() {
            self.params.brightness_percent = percent.clamp(0.0, crate::transform::PERCENT_MAX);
        }
    }

    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        if self.mode == EditMode::Rotating && self.input_enabled() {
            self.params.rotation_degrees = degrees.clamp(
                -crate::transform::ROTATION_DEGREES_MAX,
                crate::transform::ROTATION_DEGREES_MAX,
            );
        }
    }

    // ===== Commit =====

    /// Snapshot the active edit as a [`CommitRequest`] and disable input.
    ///
    /// At most one request may be in flight; a second call before
    /// [`finish_commit`](Self::finish_commit) is rejected.
    pub fn begin_commit(&mut self) -> Result<CommitRequest, EditError> {
        if self.commit_pending {
            return Err(EditError::CommitPending);
        }
        let raster = self.raster.as_ref().ok_or(EditError::NoActiveEdit)?;

        let operation = match self.mode {
            EditMode::Idle => return Err(EditError::NoActiveEdit),
            EditMode::Cropping => {
                // The crop editor exists whenever Cropping is active
                let rect = self
                    .crop
                    .as_ref()
                    .map(|c| c.rect())
                    .ok_or(EditError::NoActiveEdit)?;
                let scale = scale_factors(raster.width, raster.height, self.display);
                Operation::Crop { rect, scale }
            }
            EditMode::Blurring => Operation::Blur {
                radius: self.params.blur_radius,
            },
            EditMode::Contrasting => Operation::Contrast {
                percent: self.params.contrast_percent,
            },
            EditMode::Brightening => Operation::Brightness {
                percent: self.params.brightness_percent,
            },
            EditMode::Rotating => Operation::Rotate {
                degrees: self.params.rotation_degrees,
            },
        };

        self.commit_pending = true;
        log::debug!("commit dispatched: {}", operation.name());
        Ok(CommitRequest {
            operation,
            source: Arc::downgrade(raster),
        })
    }

    /// Adopt the outcome of a dispatched commit.
    ///
    /// On success the new raster replaces the current one, display metrics
    /// reset to its native dimensions pending a fresh report from the
    /// surface, and the session returns to Idle. On failure the session
    /// stays in the active mode with input re-enabled and the error is
    /// propagated as an advisory.
    pub fn finish_commit(&mut self, result: Result<Raster, TransformError>) -> Result<(), EditError> {
        if !self.commit_pending {
            return Err(EditError::NoActiveEdit);
        }
        self.commit_pending = false;

        match result {
            Ok(raster) => {
                log::debug!(
                    "commit applied: {} now {}x{}",
                    self.mode,
                    raster.width,
                    raster.height
                );
                self.display = DisplayMetrics::new(raster.width as f32, raster.height as f32);
                self.raster = Some(Arc::new(raster));
                self.reset_edit_state();
                Ok(())
            }
            Err(err) => {
                log::warn!("commit failed in {} mode: {}", self.mode, err);
                Err(err.into())
            }
        }
    }

    /// Run a full commit synchronously against the given pipeline.
    pub fn commit(&mut self, pipeline: &dyn TransformPipeline) -> Result<(), EditError> {
        let request = self.begin_commit()?;
        let result = request.execute(pipeline);
        self.finish_commit(result)
    }

    fn reset_edit_state(&mut self) {
        self.mode = EditMode::Idle;
        self.params = FilterParams::default();
        self.crop = None;
        self.commit_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{HitTarget, Point};
    use crate::transform::LocalPipeline;
    use crate::DEFAULT_BLUR_RADIUS;

    fn gray_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[128, 128, 128, 255]);
        }
        Raster::new(width, height, pixels)
    }

    fn session_with_image() -> EditSession {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut session = EditSession::new();
        session.load(gray_image(800, 600));
        session
    }

    // ===== Guarded entry =====

    #[test]
    fn test_entry_without_image_is_refused() {
        let mut session = EditSession::new();
        let err = session.enter(EditMode::Cropping).unwrap_err();

        assert!(matches!(
            err,
            EditError::NoImage {
                requested: EditMode::Cropping
            }
        ));
        assert_eq!(session.mode(), EditMode::Idle);
    }

    #[test]
    fn test_advisory_names_the_operation() {
        let mut session = EditSession::new();
        let err = session.enter(EditMode::Blurring).unwrap_err();
        assert!(err.to_string().contains("blur"));
    }

    #[test]
    fn test_entry_with_image_succeeds() {
        let mut session = session_with_image();
        session.enter(EditMode::Rotating).expect("image is loaded");
        assert_eq!(session.mode(), EditMode::Rotating);
    }

    #[test]
    fn test_mutual_exclusion() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("first entry");

        let err = session.enter(EditMode::Cropping).unwrap_err();
        assert!(matches!(
            err,
            EditError::ModeActive {
                active: EditMode::Blurring,
                requested: EditMode::Cropping
            }
        ));
        assert_eq!(session.mode(), EditMode::Blurring);
    }

    #[test]
    fn test_enter_idle_is_noop() {
        let mut session = session_with_image();
        session.enter(EditMode::Idle).expect("no-op");
        assert_eq!(session.mode(), EditMode::Idle);
    }

    // ===== Cancel =====

    #[test]
    fn test_cancel_restores_defaults() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("entry");
        session.set_blur_radius(17.0);
        session.set_blur_radius(2.5);

        session.cancel().expect("no commit pending");
        assert_eq!(session.mode(), EditMode::Idle);
        assert_eq!(session.params().blur_radius, DEFAULT_BLUR_RADIUS);
    }

    #[test]
    fn test_cancel_does_not_touch_raster() {
        let mut session = session_with_image();
        let before = session.current().expect("image loaded");

        session.enter(EditMode::Contrasting).expect("entry");
        session.set_contrast_percent(180.0);
        session.cancel().expect("no commit pending");

        let after = session.current().expect("image still loaded");
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_cancel_resets_crop_state() {
        let mut session = session_with_image();
        session.set_display_metrics(DisplayMetrics::new(400.0, 300.0));
        session.enter(EditMode::Cropping).expect("entry");

        let crop = session.crop_editor_mut().expect("cropping active");
        crop.pointer_down(Point::new(200.0, 150.0), HitTarget::Body);
        crop.pointer_move(Point::new(250.0, 180.0));

        session.cancel().expect("no commit pending");
        assert!(session.crop_editor().is_none());

        // Re-entering starts from the default rect again
        session.enter(EditMode::Cropping).expect("re-entry");
        let rect = session.crop_editor().expect("cropping active").rect();
        assert_eq!(rect, CropEditor::default_rect(DisplayMetrics::new(400.0, 300.0)));
    }

    // ===== Sliders =====

    #[test]
    fn test_sliders_ignored_outside_their_mode() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("entry");

        session.set_contrast_percent(150.0);
        session.set_rotation_degrees(90.0);
        assert_eq!(session.params().contrast_percent, 100.0);
        assert_eq!(session.params().rotation_degrees, 0.0);
    }

    #[test]
    fn test_sliders_clamp_to_range() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("entry");
        session.set_blur_radius(500.0);
        assert_eq!(session.params().blur_radius, 20.0);

        session.cancel().expect("no commit pending");
        session.enter(EditMode::Rotating).expect("entry");
        session.set_rotation_degrees(-720.0);
        assert_eq!(session.params().rotation_degrees, -360.0);
    }

    // ===== Commit =====

    #[test]
    fn test_commit_replaces_raster_and_returns_to_idle() {
        let mut session = session_with_image();
        let before = session.current().expect("image loaded");

        session.enter(EditMode::Brightening).expect("entry");
        session.set_brightness_percent(150.0);
        session.commit(&LocalPipeline).expect("commit succeeds");

        assert_eq!(session.mode(), EditMode::Idle);
        assert!(session.params().is_default());

        let after = session.current().expect("image still loaded");
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.pixels[0], 192); // 128 * 1.5
    }

    #[test]
    fn test_crop_commit_scenario() {
        // 800x600 native shown at 400x300; committing the display rect
        // {50,50,200,150} yields a 400x300 raster.
        let mut session = session_with_image();
        session.set_display_metrics(DisplayMetrics::new(400.0, 300.0));
        session.enter(EditMode::Cropping).expect("entry");

        // Drag the default rect into place: default is {100,75,200,150}
        let crop = session.crop_editor_mut().expect("cropping active");
        crop.pointer_down(Point::new(150.0, 100.0), HitTarget::Body);
        crop.pointer_move(Point::new(100.0, 75.0));
        crop.pointer_up();
        assert_eq!(crop.rect(), crate::geometry::CropRect::new(50.0, 50.0, 200.0, 150.0));

        session.commit(&LocalPipeline).expect("commit succeeds");

        let result = session.current().expect("image present");
        assert_eq!(result.width, 400);
        assert_eq!(result.height, 300);
    }

    #[test]
    fn test_commit_in_idle_is_rejected() {
        let mut session = session_with_image();
        let err = session.commit(&LocalPipeline).unwrap_err();
        assert!(matches!(err, EditError::NoActiveEdit));
    }

    #[test]
    fn test_second_begin_commit_is_rejected() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("entry");

        let _pending = session.begin_commit().expect("first commit");
        let err = session.begin_commit().unwrap_err();
        assert!(matches!(err, EditError::CommitPending));
    }

    #[test]
    fn test_input_disabled_while_commit_pending() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("entry");
        session.set_blur_radius(8.0);

        let _pending = session.begin_commit().expect("commit dispatched");
        assert!(!session.input_enabled());

        session.set_blur_radius(1.0);
        assert_eq!(session.params().blur_radius, 8.0);

        let err = session.cancel().unwrap_err();
        assert!(matches!(err, EditError::CommitPending));
    }

    #[test]
    fn test_failed_commit_keeps_mode_active() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("entry");

        let request = session.begin_commit().expect("commit dispatched");
        let _ = request; // pretend the worker failed
        let err = session
            .finish_commit(Err(TransformError::TransformFailed("out of memory".into())))
            .unwrap_err();

        assert!(matches!(err, EditError::Transform(_)));
        assert_eq!(session.mode(), EditMode::Blurring);
        assert!(session.input_enabled(), "input re-enabled after failure");
        assert!(session.has_image(), "raster untouched");
    }

    #[test]
    fn test_clear_during_pending_commit_surfaces_source_unavailable() {
        let mut session = session_with_image();
        session.enter(EditMode::Blurring).expect("entry");

        let request = session.begin_commit().expect("commit dispatched");
        session.clear();

        let result = request.execute(&LocalPipeline);
        assert!(matches!(result, Err(TransformError::SourceUnavailable)));
    }

    #[test]
    fn test_commit_pipeline_determinism_through_session() {
        let run = || {
            let mut session = session_with_image();
            session.enter(EditMode::Rotating).expect("entry");
            session.set_rotation_degrees(37.0);
            session.commit(&LocalPipeline).expect("commit succeeds");
            session.current().expect("image present")
        };
        let a = run();
        let b = run();
        assert_eq!(a.pixels, b.pixels);
    }

    // ===== Lifecycle =====

    #[test]
    fn test_clear_forces_idle_and_resets() {
        let mut session = session_with_image();
        session.enter(EditMode::Rotating).expect("entry");
        session.set_rotation_degrees(45.0);

        session.clear();
        assert!(!session.has_image());
        assert_eq!(session.mode(), EditMode::Idle);
        assert!(session.params().is_default());
        assert!(session.crop_editor().is_none());
    }

    #[test]
    fn test_load_drops_previous_handle() {
        let mut session = session_with_image();
        let first = session.current().expect("image loaded");
        let weak = Arc::downgrade(&first);
        drop(first);

        session.load(gray_image(10, 10));
        assert!(weak.upgrade().is_none(), "previous raster released");
    }

    #[test]
    fn test_load_defaults_display_to_native() {
        let mut session = EditSession::new();
        session.load(gray_image(640, 480));
        let metrics = session.display_metrics();
        assert_eq!(metrics.width, 640.0);
        assert_eq!(metrics.height, 480.0);
    }
}
