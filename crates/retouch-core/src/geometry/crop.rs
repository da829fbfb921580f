//! The interactive crop rectangle engine.
//!
//! [`CropEditor`] owns the crop rectangle and the transient pointer
//! interaction state, and consumes the three canonical pointer events
//! (`pointer_down`, `pointer_move`, `pointer_up`). All mutation is clamping,
//! never rejection: the rectangle invariants hold after every event, for any
//! event sequence.
//!
//! # Invariants
//!
//! After every mutation:
//! - `width >= MIN_CROP_SIZE` and `height >= MIN_CROP_SIZE`
//! - `x >= 0`, `y >= 0`
//! - `x + width <= container.width`, `y + height <= container.height`
//!
//! The container is expected to be at least `MIN_CROP_SIZE` on each axis;
//! smaller containers are a rendering-surface defect, not a state this
//! engine handles.

use serde::{Deserialize, Serialize};

use super::mapper::{DisplayMetrics, Point};

/// Minimum crop rectangle edge length in display units.
pub const MIN_CROP_SIZE: f32 = 50.0;

/// Half-width of the square hit area around each corner handle.
pub const HANDLE_HIT_RADIUS: f32 = 12.0;

/// One of the four corner resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];
}

/// What a pointer-down landed on.
///
/// Handle hits take priority over the body: a pointer-down resolved to a
/// handle must not also start a body drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Handle(Handle),
    Body,
}

/// Transient pointer interaction state.
///
/// Lives only between a pointer-down and the matching pointer-up; the
/// anchor is the last observed pointer position, so deltas accumulate
/// incrementally and repeated clamping cannot drift the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    None,
    Dragging {
        anchor: Point,
    },
    Resizing {
        handle: Handle,
        anchor: Point,
    },
}

/// The crop rectangle in display-space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Display-space position of a corner handle.
    pub fn corner(&self, handle: Handle) -> Point {
        match handle {
            Handle::Nw => Point::new(self.x, self.y),
            Handle::Ne => Point::new(self.right(), self.y),
            Handle::Sw => Point::new(self.x, self.bottom()),
            Handle::Se => Point::new(self.right(), self.bottom()),
        }
    }
}

/// State machine over the crop rectangle and its pointer interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CropEditor {
    rect: CropRect,
    container: DisplayMetrics,
    state: DragState,
}

impl CropEditor {
    /// Create an editor with the default centered rectangle for `container`.
    pub fn new(container: DisplayMetrics) -> Self {
        Self {
            rect: Self::default_rect(container),
            container,
            state: DragState::None,
        }
    }

    /// The default rectangle: centered, half the container on each axis,
    /// floored at the minimum size.
    pub fn default_rect(container: DisplayMetrics) -> CropRect {
        let width = (container.width * 0.5).max(MIN_CROP_SIZE);
        let height = (container.height * 0.5).max(MIN_CROP_SIZE);
        CropRect::new(
            ((container.width - width) * 0.5).max(0.0),
            ((container.height - height) * 0.5).max(0.0),
            width,
            height,
        )
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn container(&self) -> DisplayMetrics {
        self.container
    }

    pub fn interaction(&self) -> DragState {
        self.state
    }

    /// Reset the rectangle to the default and drop any interaction.
    pub fn reset(&mut self) {
        self.rect = Self::default_rect(self.container);
        self.state = DragState::None;
    }

    /// Adopt a new container size (viewport change) and re-clamp the
    /// rectangle into it.
    pub fn set_container(&mut self, container: DisplayMetrics) {
        self.container = container;
        self.rect.width = self.rect.width.min(container.width).max(MIN_CROP_SIZE);
        self.rect.height = self.rect.height.min(container.height).max(MIN_CROP_SIZE);
        self.rect.x = self.rect.x.clamp(0.0, (container.width - self.rect.width).max(0.0));
        self.rect.y = self.rect.y.clamp(0.0, (container.height - self.rect.height).max(0.0));
    }

    /// Resolve a container-relative point to a handle or the body.
    ///
    /// Handles are tested first so a hit near a corner never starts a body
    /// drag, mirroring stop-propagation semantics of the input layer.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        for handle in Handle::ALL {
            let corner = self.rect.corner(handle);
            if (point.x - corner.x).abs() <= HANDLE_HIT_RADIUS
                && (point.y - corner.y).abs() <= HANDLE_HIT_RADIUS
            {
                return Some(HitTarget::Handle(handle));
            }
        }
        if self.rect.contains(point) {
            return Some(HitTarget::Body);
        }
        None
    }

    /// Begin an interaction at `point` on the given target.
    pub fn pointer_down(&mut self, point: Point, target: HitTarget) {
        self.state = match target {
            HitTarget::Body => DragState::Dragging { anchor: point },
            HitTarget::Handle(handle) => DragState::Resizing {
                anchor: point,
                handle,
            },
        };
    }

    /// Advance the active interaction to `point`. No-op when idle.
    pub fn pointer_move(&mut self, point: Point) {
        match self.state {
            DragState::None => {}
            DragState::Dragging { anchor } => {
                let dx = point.x - anchor.x;
                let dy = point.y - anchor.y;
                self.rect.x = (self.rect.x + dx)
                    .clamp(0.0, (self.container.width - self.rect.width).max(0.0));
                self.rect.y = (self.rect.y + dy)
                    .clamp(0.0, (self.container.height - self.rect.height).max(0.0));
                self.state = DragState::Dragging { anchor: point };
            }
            DragState::Resizing { handle, anchor } => {
                let dx = point.x - anchor.x;
                let dy = point.y - anchor.y;
                self.resize_by(handle, dx, dy);
                self.state = DragState::Resizing {
                    handle,
                    anchor: point,
                };
            }
        }
    }

    /// End the interaction, discarding the anchor.
    pub fn pointer_up(&mut self) {
        self.state = DragState::None;
    }

    /// Apply a resize delta to the two edges adjacent to `handle`.
    ///
    /// Width and height are floored at the minimum before the opposing edge
    /// moves, so shrinking past the minimum pins the edge instead of
    /// overshooting. Overflow at the container's far edge is handled by
    /// clamping the size, never by re-deriving x/y.
    fn resize_by(&mut self, handle: Handle, dx: f32, dy: f32) {
        let r = &mut self.rect;
        match handle {
            Handle::Nw => {
                let width = (r.width - dx).max(MIN_CROP_SIZE);
                r.x += r.width - width;
                r.width = width;
                let height = (r.height - dy).max(MIN_CROP_SIZE);
                r.y += r.height - height;
                r.height = height;
            }
            Handle::Ne => {
                r.width = (r.width + dx).max(MIN_CROP_SIZE);
                let height = (r.height - dy).max(MIN_CROP_SIZE);
                r.y += r.height - height;
                r.height = height;
            }
            Handle::Sw => {
                let width = (r.width - dx).max(MIN_CROP_SIZE);
                r.x += r.width - width;
                r.width = width;
                r.height = (r.height + dy).max(MIN_CROP_SIZE);
            }
            Handle::Se => {
                r.width = (r.width + dx).max(MIN_CROP_SIZE);
                r.height = (r.height + dy).max(MIN_CROP_SIZE);
            }
        }

        // A left/top edge pushed past the origin keeps the opposite edge fixed.
        if r.x < 0.0 {
            r.width += r.x;
            r.x = 0.0;
        }
        if r.y < 0.0 {
            r.height += r.y;
            r.y = 0.0;
        }
        if r.right() > self.container.width {
            r.width = self.container.width - r.x;
        }
        if r.bottom() > self.container.height {
            r.height = self.container.height - r.y;
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
