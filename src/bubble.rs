//! Speech bubble outline for dialogue elements.
//!
//! The outline lives in a fixed 100×150 view box: a rounded body from
//! y=0 to y=90 and, optionally, a triangular tail spliced into the bottom
//! edge. Hosts scale the path to the element's transform and use it for
//! both fill/stroke and clipping.

#[cfg(test)]
#[path = "bubble_test.rs"]
mod bubble_test;

use crate::element::DialogueProps;

pub const VIEWBOX_WIDTH: f64 = 100.0;
pub const VIEWBOX_HEIGHT: f64 = 150.0;
/// Bottom edge of the bubble body.
pub const BODY_BOTTOM: f64 = 90.0;
pub const CORNER_RADIUS: f64 = 10.0;
pub const TAIL_HALF_WIDTH: f64 = 10.0;
/// Lowest point the tail apex may reach.
pub const TAIL_APEX_MAX: f64 = 140.0;

/// Tail parameters for one bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleShape {
    pub has_tail: bool,
    /// Fraction of the body width locating the tail base (0–1).
    pub tail_angle: f64,
    /// Tail protrusion below the body.
    pub tail_length: f64,
}

impl Default for BubbleShape {
    fn default() -> Self {
        Self::from(&DialogueProps::default())
    }
}

impl From<&DialogueProps> for BubbleShape {
    fn from(props: &DialogueProps) -> Self {
        Self { has_tail: props.has_tail, tail_angle: props.tail_angle, tail_length: props.tail_length }
    }
}

impl BubbleShape {
    /// Horizontal center of the tail base, inside the view box.
    #[must_use]
    pub fn tail_center(&self) -> f64 {
        let angle = if self.tail_angle.is_finite() { self.tail_angle } else { 0.5 };
        (angle * VIEWBOX_WIDTH).clamp(0.0, VIEWBOX_WIDTH)
    }

    /// Y of the tail apex. Long tails are capped so they stay inside the view box.
    #[must_use]
    pub fn tail_apex(&self) -> f64 {
        let length = if self.tail_length.is_finite() { self.tail_length.max(0.0) } else { 0.0 };
        (BODY_BOTTOM + length).min(TAIL_APEX_MAX)
    }

    /// Closed SVG path data for the outline. Identical inputs always give
    /// byte-identical output.
    #[must_use]
    pub fn path(&self) -> String {
        let (w, b, r) = (VIEWBOX_WIDTH, BODY_BOTTOM, CORNER_RADIUS);
        let mut segments = vec![
            format!("M {} 0", num(r)),
            format!("L {} 0", num(w - r)),
            format!("Q {} 0 {} {}", num(w), num(w), num(r)),
            format!("L {} {}", num(w), num(b - r)),
            format!("Q {} {} {} {}", num(w), num(b), num(w - r), num(b)),
        ];

        // Bottom edge runs right to left, so the tail base is visited east first.
        if self.has_tail {
            let cx = self.tail_center();
            segments.push(format!("L {} {}", num(cx + TAIL_HALF_WIDTH), num(b)));
            segments.push(format!("L {} {}", num(cx), num(self.tail_apex())));
            segments.push(format!("L {} {}", num(cx - TAIL_HALF_WIDTH), num(b)));
        }

        segments.extend([
            format!("L {} {}", num(r), num(b)),
            format!("Q 0 {} 0 {}", num(b), num(b - r)),
            format!("L 0 {}", num(r)),
            format!("Q 0 0 {} 0", num(r)),
            "Z".to_string(),
        ]);
        segments.join(" ")
    }
}

/// Outline for a dialogue element's current properties.
#[must_use]
pub fn dialogue_path(props: &DialogueProps) -> String {
    BubbleShape::from(props).path()
}

/// Two-decimal formatting without trailing zeros (`50`, `32.5`, `33.33`).
fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.abs() < f64::EPSILON { "0".to_string() } else { format!("{rounded}") }
}
