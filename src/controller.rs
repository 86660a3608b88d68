//! Workspace interaction controller: turns pointer, wheel, and keyboard
//! events into store mutations.
//!
//! The controller holds only the active gesture ([`InteractionState`]); all
//! document, selection, and viewport state lives in the [`CanvasStore`]
//! passed to each handler. Handlers return [`Action`]s telling the host what
//! to do next (re-render, change cursor, persist a created element).

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use tracing::debug;

use crate::element::{Element, ElementId, ElementType};
use crate::geometry::Position;
use crate::hit::{self, HitPart};
use crate::input::{Button, DragOrigin, InteractionState, Key, Modifiers, Tool, WheelDelta};
use crate::store::CanvasStore;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    ElementCreated(ElementId),
    ElementsRemoved(Vec<ElementId>),
    SetCursor(String),
}

#[derive(Debug, Default)]
pub struct WorkspaceController {
    state: InteractionState,
}

impl WorkspaceController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture currently in progress.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    // --- Pointer ---

    /// Start a gesture: pan, resize, drag, select, or click-to-create.
    ///
    /// Ignored while another gesture is active.
    pub fn on_pointer_down(
        &mut self,
        store: &mut CanvasStore,
        screen: Position,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        if !matches!(self.state, InteractionState::Idle) {
            debug!(mode = self.state.mode(), "pointer down ignored during active gesture");
            return Vec::new();
        }

        let wants_pan = match button {
            Button::Middle => true,
            Button::Primary => store.tool() == Tool::Pan || modifiers.alt,
            Button::Secondary => return Vec::new(),
        };
        if wants_pan {
            self.state = InteractionState::Panning { start_screen: screen, orig_pan: store.viewport().pan_offset };
            return vec![Action::SetCursor("grabbing".into())];
        }

        let viewport = store.viewport();
        let page_pt = viewport.screen_to_page(screen);
        let radius = viewport.screen_dist_to_page(store.config().handle_radius_px);

        match hit::hit_test(page_pt, store.current_page(), store.selection(), radius) {
            Some(hit) => match hit.part {
                HitPart::ResizeHandle(handle) => {
                    let Some(el) = store.element(&hit.element_id) else {
                        return Vec::new();
                    };
                    self.state = InteractionState::Resizing {
                        id: el.id,
                        handle,
                        start_screen: screen,
                        orig: el.transform,
                    };
                    vec![Action::SetCursor(handle.cursor().into())]
                }
                HitPart::Body => self.press_element(store, hit.element_id, screen, modifiers),
            },
            None => Self::press_background(store, page_pt),
        }
    }

    /// Advance the active gesture.
    pub fn on_pointer_move(&mut self, store: &mut CanvasStore, screen: Position) -> Vec<Action> {
        match &self.state {
            InteractionState::Idle => Vec::new(),
            InteractionState::Dragging { start_screen, origins } => {
                let viewport = store.viewport();
                let dx = viewport.screen_dist_to_page(screen.x - start_screen.x);
                let dy = viewport.screen_dist_to_page(screen.y - start_screen.y);
                for origin in origins {
                    store.move_element(&origin.id, origin.start.offset(dx, dy));
                }
                vec![Action::RenderNeeded]
            }
            InteractionState::Resizing { id, handle, start_screen, orig } => {
                let viewport = store.viewport();
                let dx = viewport.screen_dist_to_page(screen.x - start_screen.x);
                let dy = viewport.screen_dist_to_page(screen.y - start_screen.y);
                let next = handle.resize(orig, dx, dy, store.config().min_element_size);
                store.move_element(id, next.position);
                store.resize_element(id, next.size);
                vec![Action::RenderNeeded]
            }
            InteractionState::Panning { start_screen, orig_pan } => {
                store.set_pan_offset(orig_pan.offset(screen.x - start_screen.x, screen.y - start_screen.y));
                vec![Action::RenderNeeded]
            }
        }
    }

    /// End the active gesture. Every mode returns to idle.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let previous = std::mem::take(&mut self.state);
        if matches!(previous, InteractionState::Idle) {
            return Vec::new();
        }
        debug!(mode = previous.mode(), "gesture ended");
        vec![Action::SetCursor("default".into()), Action::RenderNeeded]
    }

    // --- Wheel ---

    /// Ctrl/Cmd + wheel zooms by one fixed step per event, whatever the delta
    /// magnitude; a plain wheel pans.
    pub fn on_wheel(&mut self, store: &mut CanvasStore, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            let step = store.config().zoom_step;
            let zoom = store.viewport().zoom;
            let next = if delta.dy < 0.0 {
                zoom + step
            } else if delta.dy > 0.0 {
                zoom - step
            } else {
                return Vec::new();
            };
            store.set_zoom(next);
            debug!(zoom = store.viewport().zoom, "zoom changed");
            return vec![Action::RenderNeeded];
        }

        let pan = store.viewport().pan_offset;
        store.set_pan_offset(pan.offset(-delta.dx, -delta.dy));
        vec![Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, store: &mut CanvasStore, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is("Delete") || key.is("Backspace") {
            if store.selection().is_empty() {
                return Vec::new();
            }
            let removed = store.remove_selected();
            if removed.is_empty() {
                // Everything selected was locked; only the selection changed.
                return vec![Action::RenderNeeded];
            }
            self.state = InteractionState::Idle;
            debug!(count = removed.len(), "deleted selection");
            return vec![Action::ElementsRemoved(removed), Action::RenderNeeded];
        }

        if key.is("Escape") {
            self.state = InteractionState::Idle;
            store.deselect_all();
            store.set_tool(Tool::Select);
            return vec![Action::SetCursor("default".into()), Action::RenderNeeded];
        }

        if modifiers.command() && key.is("d") {
            let Some(first) = store.selection().first().copied() else {
                return Vec::new();
            };
            return match store.duplicate_element(&first) {
                Some(copy) => vec![Action::ElementCreated(copy), Action::RenderNeeded],
                None => Vec::new(),
            };
        }

        Vec::new()
    }

    // --- Helpers ---

    fn press_element(
        &mut self,
        store: &mut CanvasStore,
        id: ElementId,
        screen: Position,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        if modifiers.shift {
            store.select_element(&id, true);
        } else if !store.is_selected(&id) {
            store.select_element(&id, false);
        }

        let grabbed_unlocked = store.is_selected(&id) && store.element(&id).is_some_and(|el| !el.locked);
        if !grabbed_unlocked {
            return vec![Action::RenderNeeded];
        }

        let origins: Vec<DragOrigin> = store
            .selection()
            .iter()
            .filter_map(|sel| store.element(sel))
            .filter(|el| !el.locked)
            .map(|el| DragOrigin { id: el.id, start: el.transform.position })
            .collect();
        debug!(count = origins.len(), "drag armed");
        self.state = InteractionState::Dragging { start_screen: screen, origins };
        vec![Action::SetCursor("move".into()), Action::RenderNeeded]
    }

    fn press_background(store: &mut CanvasStore, page_pt: Position) -> Vec<Action> {
        let Some(kind) = store.tool().creates() else {
            store.deselect_all();
            return vec![Action::RenderNeeded];
        };

        let id = store.generate_id();
        let config = store.config();
        let mut element = match kind {
            ElementType::Panel => Element::panel(id, page_pt, config.panel_size),
            ElementType::Text => Element::text(id, page_pt, config.text_size),
            ElementType::Dialogue => Element::dialogue(id, page_pt, config.dialogue_size),
            ElementType::Image => Element::image(id, page_pt, config.panel_size, ""),
        };
        element.transform.z_index = store.current_page().max_z().map_or(0, |z| z + 1);

        if !store.add_element(element) {
            return Vec::new();
        }
        store.select_element(&id, false);
        store.set_tool(Tool::Select);
        debug!(%id, ?kind, "element placed");
        vec![Action::ElementCreated(id), Action::RenderNeeded]
    }
}
