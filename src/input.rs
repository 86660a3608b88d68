//! Input model: tools, modifier keys, mouse buttons, and the interaction state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InteractionState` is the single active gesture between pointer-down
//! and pointer-up; each variant carries the snapshot taken when the gesture
//! began, so deltas are always computed against the gesture start rather than
//! accumulated per event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementType};
use crate::geometry::{Position, Transform};
use crate::hit::ResizeHandle;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Drag to pan the viewport.
    Pan,
    /// Click to place a panel.
    Panel,
    /// Click to place a text box.
    Text,
    /// Click to place a dialogue bubble.
    Dialogue,
}

impl Tool {
    /// The element type this tool places on click, if it is a creation tool.
    #[must_use]
    pub fn creates(self) -> Option<ElementType> {
        match self {
            Self::Panel => Some(ElementType::Panel),
            Self::Text => Some(ElementType::Text),
            Self::Dialogue => Some(ElementType::Dialogue),
            Self::Select | Self::Pan => None,
        }
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Alt / Option key.
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux or Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"d"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Case-insensitive comparison for single-character keys.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Wheel / trackpad scroll delta in pixels (positive `dy` = down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Start position of one element taking part in a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub id: ElementId,
    pub start: Position,
}

/// The active gesture. Exactly one mode is live at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving every selected, unlocked element rigidly.
    Dragging {
        /// Screen position of the pointer-down.
        start_screen: Position,
        /// Each participating element with its position at drag start.
        origins: Vec<DragOrigin>,
    },
    /// Resizing the single selected element by one of its eight handles.
    Resizing {
        id: ElementId,
        handle: ResizeHandle,
        start_screen: Position,
        /// Transform at resize start.
        orig: Transform,
    },
    /// Translating the viewport.
    Panning {
        start_screen: Position,
        /// Pan offset at pan start.
        orig_pan: Position,
    },
}

impl InteractionState {
    /// Short mode name for logs.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Panning { .. } => "panning",
        }
    }
}
