//! Pointer interaction sessions (drag / resize / rotate).
//!
//! An `Interaction` exists from pointer-down to pointer-up. It remembers the
//! target and the pre-gesture snapshot; each pointer-move recomputes the
//! target's geometry from that snapshot via `lc_core::transform`.

use lc_core::{AssetId, CanvasRect, Geometry, Gesture, GestureStart, Handle, PageId, Point};

/// Coarse gesture state, for cursors and status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Resizing(Handle),
    Rotating,
}

/// An in-progress pointer gesture on one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub page: PageId,
    pub asset: AssetId,
    pub start: GestureStart,
    /// Last geometry written to the document.
    pub last: Geometry,
}

impl Interaction {
    pub fn new(
        page: PageId,
        asset: AssetId,
        gesture: Gesture,
        pointer: Point,
        geometry: Geometry,
        canvas: CanvasRect,
    ) -> Self {
        Self {
            page,
            asset,
            start: GestureStart {
                gesture,
                pointer,
                geometry,
                canvas,
            },
            last: geometry,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        match self.start.gesture {
            Gesture::Drag => InteractionMode::Dragging,
            Gesture::Resize(h) => InteractionMode::Resizing(h),
            Gesture::Rotate => InteractionMode::Rotating,
        }
    }

    /// Compute the geometry for `pointer` and remember it.
    pub fn update(&mut self, pointer: Point, min_size: f32) -> Geometry {
        self.last = self.start.geometry_at(pointer, min_size);
        self.last
    }

    /// Whether the gesture changed the asset's geometry.
    pub fn changed(&self) -> bool {
        self.last != self.start.geometry
    }
}
