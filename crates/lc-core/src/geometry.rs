//! Page-local geometry primitives shared by the asset model and the
//! transform math.
//!
//! All coordinates are in canvas units. Pointer positions arrive in client
//! (viewport) coordinates and are related to page space through the canvas
//! bounding rect captured when a gesture starts.

use serde::{Deserialize, Serialize};

/// Smallest width or height an asset may have.
pub const MIN_SIZE: f32 = 50.0;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding rect of the canvas element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert a client-space point into page-local coordinates.
    pub fn to_page(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// Position, size, and rotation of a placed asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Left edge. May be negative while an asset hangs off the canvas.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Clockwise rotation in degrees around the box center. Never wrapped.
    pub rotation: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 300.0,
            height: 100.0,
            rotation: 0.0,
        }
    }
}

impl Geometry {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Unrotated containment test.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Center of the box in page coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Rotation wrapped into `[0, 360)` for display.
    pub fn display_rotation(&self) -> f32 {
        self.rotation.rem_euclid(360.0)
    }

    /// Raise width and height to at least `min`.
    pub fn clamp_size(&mut self, min: f32) {
        self.width = self.width.max(min);
        self.height = self.height.max(min);
    }

    /// Shift the box by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}
