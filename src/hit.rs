#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::doc::Page;
use crate::element::{Element, ElementId};
use crate::geometry::{Position, Size, Transform};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
}

/// One of the eight resize handles around an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [Self::Nw, Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W];

    /// Handle center as a fraction of the box (0 = left/top, 1 = right/bottom).
    #[must_use]
    pub fn anchor(self) -> (f64, f64) {
        match self {
            Self::Nw => (0.0, 0.0),
            Self::N => (0.5, 0.0),
            Self::Ne => (1.0, 0.0),
            Self::E => (1.0, 0.5),
            Self::Se => (1.0, 1.0),
            Self::S => (0.5, 1.0),
            Self::Sw => (0.0, 1.0),
            Self::W => (0.0, 0.5),
        }
    }

    /// Handle center in page coordinates for `transform`.
    #[must_use]
    pub fn center(self, transform: &Transform) -> Position {
        let (fx, fy) = self.anchor();
        transform.position.offset(transform.size.width * fx, transform.size.height * fy)
    }

    #[must_use]
    pub fn moves_west_edge(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    #[must_use]
    pub fn moves_east_edge(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    #[must_use]
    pub fn moves_north_edge(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    #[must_use]
    pub fn moves_south_edge(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }

    /// Apply a page-space pointer delta to `orig`, keeping the opposite edge
    /// anchored and every axis at least `min_size`.
    #[must_use]
    pub fn resize(self, orig: &Transform, dx: f64, dy: f64, min_size: f64) -> Transform {
        let mut out = *orig;
        let Size { width, height } = orig.size;

        if self.moves_east_edge() {
            out.size.width = (width + dx).max(min_size);
        } else if self.moves_west_edge() {
            out.size.width = (width - dx).max(min_size);
            out.position.x = orig.position.x + width - out.size.width;
        }

        if self.moves_south_edge() {
            out.size.height = (height + dy).max(min_size);
        } else if self.moves_north_edge() {
            out.size.height = (height - dy).max(min_size);
            out.position.y = orig.position.y + height - out.size.height;
        }

        out
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Find what is under `page_pt`.
///
/// Handles of the single selected element are checked first (within
/// `handle_radius` page units), then element bodies from the top of the paint
/// order down. Hidden elements are skipped. Rotation is ignored.
#[must_use]
pub fn hit_test(page_pt: Position, page: &Page, selection: &[ElementId], handle_radius: f64) -> Option<Hit> {
    if let [only] = selection {
        if let Some(el) = page.get(only).filter(|el| el.visible && !el.locked) {
            if let Some(handle) = handle_at(page_pt, el, handle_radius) {
                return Some(Hit { element_id: el.id, part: HitPart::ResizeHandle(handle) });
            }
        }
    }

    page.sorted_elements()
        .into_iter()
        .rev()
        .find(|el| el.visible && el.transform.contains(page_pt))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}

fn handle_at(page_pt: Position, el: &Element, radius: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL.into_iter().find(|handle| {
        let c = handle.center(&el.transform);
        (page_pt.x - c.x).abs() <= radius && (page_pt.y - c.y).abs() <= radius
    })
}
