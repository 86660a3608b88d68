//! Geometry value types shared by elements, the viewport, and hit-testing.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in page space (unscaled) or screen space, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset by `dx`, `dy`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Width and height in page units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp both axes to at least `min`.
    #[must_use]
    pub fn at_least(self, min: f64) -> Self {
        Self { width: self.width.max(min), height: self.height.max(min) }
    }
}

/// Placement of an element on its page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Top-left corner in page coordinates.
    pub position: Position,
    pub size: Size,
    /// Clockwise rotation in degrees. Not applied to hit-testing.
    pub rotation: f64,
    /// Paint order; higher values paint on top.
    pub z_index: i64,
}

impl Transform {
    #[must_use]
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size, rotation: 0.0, z_index: 0 }
    }

    /// Whether `pt` lies inside the unrotated bounding box (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Position) -> bool {
        let Position { x, y } = self.position;
        pt.x >= x && pt.x <= x + self.size.width && pt.y >= y && pt.y <= y + self.size.height
    }
}
