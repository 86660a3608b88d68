//! Scripted input replay.
//!
//! A script is a JSON array of events, each tagged by `event`:
//!
//! ```json
//! [
//!   { "event": "setTool", "tool": "panel" },
//!   { "event": "pointerDown", "x": 200, "y": 150 },
//!   { "event": "pointerUp" },
//!   { "event": "keyDown", "key": "d", "modifiers": { "ctrl": true } }
//! ]
//! ```
//!
//! Events drive a [`WorkspaceController`] against a [`CanvasStore`] exactly
//! as a host would, so a script reproduces an editing session headlessly.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::controller::{Action, WorkspaceController};
use crate::error::CanvasError;
use crate::geometry::Position;
use crate::input::{Button, Key, Modifiers, Tool, WheelDelta};
use crate::store::CanvasStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    Wheel {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    SetTool {
        tool: Tool,
    },
    SetZoom {
        zoom: f64,
    },
    SetPanOffset {
        x: f64,
        y: f64,
    },
    AddPage,
    SetCurrentPage {
        index: usize,
    },
}

/// Parse a script, reporting the index of the first malformed event.
///
/// # Errors
///
/// Returns [`CanvasError::Json`] when the input is not a JSON array and
/// [`CanvasError::InvalidScript`] when an element of it is not a known event.
pub fn parse_script(json: &str) -> Result<Vec<ScriptEvent>, CanvasError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value)
                .map_err(|e| CanvasError::InvalidScript { index, message: e.to_string() })
        })
        .collect()
}

/// Feed `events` through `controller` in order, collecting every action.
///
/// # Errors
///
/// Returns [`CanvasError::InvalidScript`] for a `setCurrentPage` outside the
/// project's pages. Events before the bad one have already been applied.
pub fn replay(
    store: &mut CanvasStore,
    controller: &mut WorkspaceController,
    events: &[ScriptEvent],
) -> Result<Vec<Action>, CanvasError> {
    let mut actions = Vec::new();
    for (index, event) in events.iter().enumerate() {
        debug!(index, ?event, "replaying event");
        let produced = apply(store, controller, index, event)?;
        actions.extend(produced);
    }
    info!(events = events.len(), actions = actions.len(), "replay finished");
    Ok(actions)
}

fn apply(
    store: &mut CanvasStore,
    controller: &mut WorkspaceController,
    index: usize,
    event: &ScriptEvent,
) -> Result<Vec<Action>, CanvasError> {
    let actions = match event {
        ScriptEvent::PointerDown { x, y, button, modifiers } => {
            controller.on_pointer_down(store, Position::new(*x, *y), *button, *modifiers)
        }
        ScriptEvent::PointerMove { x, y } => controller.on_pointer_move(store, Position::new(*x, *y)),
        ScriptEvent::PointerUp => controller.on_pointer_up(),
        ScriptEvent::Wheel { dx, dy, modifiers } => {
            controller.on_wheel(store, WheelDelta { dx: *dx, dy: *dy }, *modifiers)
        }
        ScriptEvent::KeyDown { key, modifiers } => controller.on_key_down(store, &Key::new(key.as_str()), *modifiers),
        ScriptEvent::SetTool { tool } => {
            store.set_tool(*tool);
            Vec::new()
        }
        ScriptEvent::SetZoom { zoom } => {
            store.set_zoom(*zoom);
            vec![Action::RenderNeeded]
        }
        ScriptEvent::SetPanOffset { x, y } => {
            store.set_pan_offset(Position::new(*x, *y));
            vec![Action::RenderNeeded]
        }
        ScriptEvent::AddPage => {
            store.add_page();
            vec![Action::RenderNeeded]
        }
        ScriptEvent::SetCurrentPage { index: page } => {
            let count = store.project().pages.len();
            if *page >= count {
                return Err(CanvasError::InvalidScript {
                    index,
                    message: format!("page {page} out of range (project has {count})"),
                });
            }
            store.set_current_page(*page);
            vec![Action::RenderNeeded]
        }
    };
    Ok(actions)
}
