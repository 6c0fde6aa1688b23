//! Transform math: pointer movement → asset geometry.
//!
//! Every function is pure and works from the snapshot taken at pointer-down,
//! never from the previous frame, so replaying the same pointer position
//! always yields the same geometry and per-frame rounding cannot accumulate.
//!
//! ## Resize clamping
//!
//! When a size hits the minimum, the edge opposite the dragged handle stays
//! fixed: the moving edge's position is derived from the *clamped* size
//! (`x' = x0 + w0 - w'`) rather than from the raw pointer delta. Below the
//! minimum the box stops shrinking instead of sliding.

use crate::geometry::{CanvasRect, Geometry, Point};
use serde::{Deserialize, Serialize};

/// One of the four corner resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// Whether the handle drags the left edge.
    fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Whether the handle drags the top edge.
    fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }
}

/// What a pointer gesture does to its asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Drag,
    Resize(Handle),
    Rotate,
}

/// Everything captured at pointer-down that the math needs later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureStart {
    pub gesture: Gesture,
    /// Pointer position in client coordinates.
    pub pointer: Point,
    /// Asset geometry before the gesture.
    pub geometry: Geometry,
    /// Canvas bounding rect in client coordinates.
    pub canvas: CanvasRect,
}

impl GestureStart {
    /// Geometry for the current pointer position.
    pub fn geometry_at(&self, pointer: Point, min_size: f32) -> Geometry {
        let dx = pointer.x - self.pointer.x;
        let dy = pointer.y - self.pointer.y;
        match self.gesture {
            Gesture::Drag => drag(self.geometry, dx, dy),
            Gesture::Resize(handle) => resize(self.geometry, handle, dx, dy, min_size),
            Gesture::Rotate => Geometry {
                rotation: rotation_towards(self.geometry, self.canvas, pointer),
                ..self.geometry
            },
        }
    }
}

/// Translate by the pointer delta. No clamping to the canvas.
pub fn drag(start: Geometry, dx: f32, dy: f32) -> Geometry {
    start.offset(dx, dy)
}

/// Resize from one corner handle, keeping the opposite corner fixed.
pub fn resize(start: Geometry, handle: Handle, dx: f32, dy: f32, min_size: f32) -> Geometry {
    let mut g = start;

    if handle.moves_left() {
        g.width = (start.width - dx).max(min_size);
        g.x = start.x + start.width - g.width;
    } else {
        g.width = (start.width + dx).max(min_size);
    }

    if handle.moves_top() {
        g.height = (start.height - dy).max(min_size);
        g.y = start.y + start.height - g.height;
    } else {
        g.height = (start.height + dy).max(min_size);
    }

    g
}

/// Rotation in degrees that points the rotate handle (above the asset) at
/// `pointer`. Straight above the center is 0°, straight right is 90°.
pub fn rotation_towards(start: Geometry, canvas: CanvasRect, pointer: Point) -> f32 {
    let (x, y) = start.center();
    let (cx, cy) = (canvas.left + x, canvas.top + y);
    (pointer.y - cy).atan2(pointer.x - cx).to_degrees() + 90.0
}
