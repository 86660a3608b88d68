//! Viewport: zoom, pan offset, and screen/page coordinate conversion.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::geometry::Position;

/// Viewport state for the workspace.
///
/// `pan_offset` and `origin` are in screen pixels. `origin` is the top-left
/// corner of the workspace container inside the host window. `zoom` is a
/// scale factor (1.0 = no zoom) and only affects rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan_offset: Position,
    pub origin: Position,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0, pan_offset: Position::default(), origin: Position::default() }
    }
}

impl Viewport {
    /// Convert a screen-space point to page coordinates.
    #[must_use]
    pub fn screen_to_page(&self, screen: Position) -> Position {
        Position {
            x: (screen.x - self.origin.x - self.pan_offset.x) / self.zoom,
            y: (screen.y - self.origin.y - self.pan_offset.y) / self.zoom,
        }
    }

    /// Convert a page-space point to screen coordinates.
    #[must_use]
    pub fn page_to_screen(&self, page: Position) -> Position {
        Position {
            x: page.x * self.zoom + self.pan_offset.x + self.origin.x,
            y: page.y * self.zoom + self.pan_offset.y + self.origin.y,
        }
    }

    /// Convert a screen-space distance to a page-space distance.
    #[must_use]
    pub fn screen_dist_to_page(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}
