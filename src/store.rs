//! Canvas store: the single mutable model behind the workspace.
//!
//! DESIGN
//! ======
//! The store owns the project, the selection, the viewport, and the active
//! tool. Every mutation goes through a named method so views never touch
//! element data directly. The store is a plain value; callers construct one
//! per workspace (or per test) and pass it by `&mut` to the interaction
//! controller.
//!
//! Element operations act on the current page. A lookup miss is a silent
//! no-op reported through the return value (`bool` / `Option`), because the
//! host routinely issues calls against ids that a previous event already
//! removed.
//!
//! Panel/child links are owned here: `add_element`, `remove_element`,
//! `duplicate_element`, and `attach_image` keep every panel's `children` in
//! agreement with its children's `parent_id`. Removing a panel does not
//! cascade; its children stay on the page as free elements.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CanvasConfig;
use crate::doc::{Page, Project};
use crate::element::{Element, ElementId, ElementKind, ElementPatch};
use crate::geometry::{Position, Size};
use crate::input::Tool;
use crate::viewport::Viewport;

pub struct CanvasStore {
    project: Project,
    /// Selected element ids on the current page, in selection order.
    selection: Vec<ElementId>,
    viewport: Viewport,
    tool: Tool,
    config: CanvasConfig,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new(Project::new("Untitled Project"))
    }
}

impl CanvasStore {
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self::with_config(project, CanvasConfig::default())
    }

    /// Build a store around `project`.
    ///
    /// A project with no pages gets a blank one and an out-of-range
    /// `current_page_index` is clamped. A config that fails
    /// [`CanvasConfig::validate`] is replaced by the defaults.
    #[must_use]
    pub fn with_config(mut project: Project, config: CanvasConfig) -> Self {
        project.ensure_current_page();
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "invalid canvas config; falling back to defaults");
                CanvasConfig::default()
            }
        };
        Self { project, selection: Vec::new(), viewport: Viewport::default(), tool: Tool::Select, config }
    }

    // =========================================================================
    // READ SURFACE
    // =========================================================================

    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Consume the store and hand back the project.
    #[must_use]
    pub fn into_project(self) -> Project {
        self.project
    }

    #[must_use]
    pub fn current_page(&self) -> &Page {
        self.project.current_page()
    }

    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selection.contains(id)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Look up an element on the current page.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.current_page().get(id)
    }

    /// Current page elements in paint order (bottom first).
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&Element> {
        self.current_page().sorted_elements()
    }

    /// Current page elements as a layers panel lists them (topmost first).
    #[must_use]
    pub fn layers(&self) -> Vec<&Element> {
        let mut els = self.sorted_elements();
        els.reverse();
        els
    }

    // =========================================================================
    // ELEMENTS
    // =========================================================================

    /// A fresh random id not used anywhere in the project.
    #[must_use]
    pub fn generate_id(&self) -> ElementId {
        loop {
            let id = Uuid::new_v4();
            if !self.project.contains_element(&id) {
                return id;
            }
        }
    }

    /// Append an element to the current page.
    ///
    /// If the element names a parent panel on this page it is registered in
    /// that panel's `children`; a parent that is missing or not a panel is
    /// cleared. Returns false (and adds nothing) if the id is already taken.
    pub fn add_element(&mut self, mut element: Element) -> bool {
        let page = self.project.current_page_mut();
        if page.contains(&element.id) {
            warn!(id = %element.id, "add_element: duplicate id rejected");
            return false;
        }

        if let Some(parent_id) = element.parent_id() {
            match page.get_mut(&parent_id).and_then(Element::children_mut) {
                Some(children) => {
                    if !children.contains(&element.id) {
                        children.push(element.id);
                    }
                }
                None => {
                    debug!(id = %element.id, %parent_id, "add_element: parent is not a panel on this page; unlinking");
                    element.set_parent_id(None);
                }
            }
        }

        debug!(id = %element.id, kind = ?element.element_type(), "element added");
        page.elements.push(element);
        self.project.touch();
        true
    }

    /// Remove an element from the current page and return it.
    ///
    /// References in panel `children` are pruned. Removing a panel leaves its
    /// children on the page with their `parent_id` cleared.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let page = self.project.current_page_mut();
        let Some(index) = page.index_of(id) else {
            debug!(%id, "remove_element: not found");
            return None;
        };
        let removed = page.elements.remove(index);

        for el in &mut page.elements {
            if let Some(children) = el.children_mut() {
                children.retain(|child| child != id);
            }
            if el.parent_id() == Some(*id) {
                el.set_parent_id(None);
            }
        }

        self.selection.retain(|sel| sel != id);
        self.project.touch();
        debug!(%id, "element removed");
        Some(removed)
    }

    /// Shallow-merge `patch` into the element. No-op if not found.
    ///
    /// A patched size is floored at the configured minimum, as in
    /// [`CanvasStore::resize_element`].
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let min = self.config.min_element_size;
        self.with_element(id, "update_element", |el| {
            el.apply_patch(patch);
            if patch.size.is_some() {
                el.transform.size = el.transform.size.at_least(min);
            }
        })
    }

    /// Set the element's position. Elements may sit partly or fully off-page.
    pub fn move_element(&mut self, id: &ElementId, position: Position) -> bool {
        self.with_element(id, "move_element", |el| el.transform.position = position)
    }

    /// Set the element's size. Each axis is floored at the configured minimum,
    /// so zero, negative, and NaN sizes never reach the page.
    pub fn resize_element(&mut self, id: &ElementId, size: Size) -> bool {
        let size = size.at_least(self.config.min_element_size);
        self.with_element(id, "resize_element", |el| el.transform.size = size)
    }

    pub fn toggle_lock(&mut self, id: &ElementId) -> bool {
        self.with_element(id, "toggle_lock", |el| el.locked = !el.locked)
    }

    pub fn toggle_visibility(&mut self, id: &ElementId) -> bool {
        self.with_element(id, "toggle_visibility", |el| el.visible = !el.visible)
    }

    /// Set an image element's `src`. Returns false for misses and non-images.
    pub fn set_image_src(&mut self, id: &ElementId, src: impl Into<String>) -> bool {
        let page = self.project.current_page_mut();
        let Some(ElementKind::Image(props)) = page.get_mut(id).map(|el| &mut el.kind) else {
            debug!(%id, "set_image_src: no image with this id");
            return false;
        };
        props.src = src.into();
        self.project.touch();
        true
    }

    /// Deep-copy an element under a new id, offset so the copy is visible,
    /// painted above everything, and selected. Returns the copy's id.
    ///
    /// A duplicated panel starts with no children, since the originals still
    /// belong to the source panel.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Option<ElementId> {
        let new_id = self.generate_id();
        let offset = self.config.duplicate_offset;
        let page = self.project.current_page_mut();
        let Some(index) = page.index_of(id) else {
            debug!(%id, "duplicate_element: not found");
            return None;
        };

        let mut copy = page.elements[index].clone();
        copy.id = new_id;
        copy.transform.position = copy.transform.position.offset(offset, offset);
        copy.transform.z_index = page.max_z().unwrap_or(0) + 1;
        if let Some(children) = copy.children_mut() {
            children.clear();
        }
        if let Some(parent_id) = copy.parent_id() {
            if let Some(children) = page.get_mut(&parent_id).and_then(Element::children_mut) {
                children.push(new_id);
            }
        }

        page.elements.insert(index + 1, copy);
        self.selection = vec![new_id];
        self.project.touch();
        debug!(source = %id, copy = %new_id, "element duplicated");
        Some(new_id)
    }

    /// Insert a generated image filling `panel_id`, registered as its child and
    /// painted above everything on the page. Returns the image id, or `None` if
    /// `panel_id` is not a panel on the current page.
    pub fn attach_image(&mut self, panel_id: &ElementId, src: impl Into<String>) -> Option<ElementId> {
        let (transform, z) = {
            let page = self.current_page();
            let panel = page.get(panel_id).filter(|el| el.children().is_some());
            let Some(panel) = panel else {
                debug!(%panel_id, "attach_image: no panel with this id");
                return None;
            };
            (panel.transform, page.max_z().unwrap_or(0) + 1)
        };

        let id = self.generate_id();
        let mut image = Element::image(id, transform.position, transform.size, src);
        image.transform.rotation = transform.rotation;
        image.transform.z_index = z;
        image.set_parent_id(Some(*panel_id));
        self.add_element(image).then_some(id)
    }

    // =========================================================================
    // Z-ORDER
    // =========================================================================

    /// Paint the element above every other element on the page.
    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        let page = self.project.current_page_mut();
        let top = page.max_z().unwrap_or(0);
        let Some(el) = page.get_mut(id) else {
            debug!(%id, "bring_to_front: not found");
            return false;
        };
        el.transform.z_index = top + 1;
        self.project.touch();
        true
    }

    /// Paint the element below every other element on the page.
    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        let page = self.project.current_page_mut();
        let bottom = page.min_z().unwrap_or(0);
        let Some(el) = page.get_mut(id) else {
            debug!(%id, "send_to_back: not found");
            return false;
        };
        el.transform.z_index = bottom - 1;
        self.project.touch();
        true
    }

    /// Swap paint order with the element directly above.
    pub fn bring_forward(&mut self, id: &ElementId) -> bool {
        self.step_z(id, 1)
    }

    /// Swap paint order with the element directly below.
    pub fn send_backward(&mut self, id: &ElementId) -> bool {
        self.step_z(id, -1)
    }

    /// Move one step through paint order, renumbering the page's z-indices to
    /// `0..n` so ties can't hide the swap. Relative order of the others holds.
    fn step_z(&mut self, id: &ElementId, step: isize) -> bool {
        let page = self.project.current_page_mut();
        let mut order: Vec<ElementId> = page.sorted_elements().iter().map(|el| el.id).collect();
        let Some(pos) = order.iter().position(|other| other == id) else {
            debug!(%id, "step_z: not found");
            return false;
        };
        let Some(target) = pos.checked_add_signed(step).filter(|t| *t < order.len()) else {
            return false;
        };
        order.swap(pos, target);
        for (z, el_id) in (0_i64..).zip(&order) {
            if let Some(el) = page.get_mut(el_id) {
                el.transform.z_index = z;
            }
        }
        self.project.touch();
        true
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Replace the selection with `id`, or toggle it when `additive`.
    pub fn select_element(&mut self, id: &ElementId, additive: bool) {
        if !self.current_page().contains(id) {
            debug!(%id, "select_element: not found");
            return;
        }
        if !additive {
            self.selection = vec![*id];
        } else if let Some(pos) = self.selection.iter().position(|sel| sel == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(*id);
        }
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Remove every selected, unlocked element and clear the selection.
    /// Returns the removed ids.
    pub fn remove_selected(&mut self) -> Vec<ElementId> {
        let targets: Vec<ElementId> = self
            .selection
            .iter()
            .filter(|id| self.element(id).is_some_and(|el| !el.locked))
            .copied()
            .collect();
        let removed: Vec<ElementId> = targets.into_iter().filter(|id| self.remove_element(id).is_some()).collect();
        self.selection.clear();
        removed
    }

    // =========================================================================
    // VIEWPORT & TOOL
    // =========================================================================

    /// Set zoom, clamped to the configured range. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            warn!(zoom, "set_zoom: ignoring non-finite zoom");
            return;
        }
        self.viewport.zoom = self.config.clamp_zoom(zoom);
    }

    pub fn set_pan_offset(&mut self, offset: Position) {
        self.viewport.pan_offset = offset;
    }

    /// Set the workspace container's top-left corner in screen coordinates.
    pub fn set_origin(&mut self, origin: Position) {
        self.viewport.origin = origin;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    // =========================================================================
    // PAGES
    // =========================================================================

    /// Append a blank page, make it current, and return its index.
    pub fn add_page(&mut self) -> usize {
        let index = self.project.pages.len();
        self.project.pages.push(Page::new(format!("Page {}", index + 1)));
        self.switch_page(index);
        self.project.touch();
        info!(index, "page added");
        index
    }

    /// Switch pages. Out-of-range indices are clamped to the last page.
    /// Returns the index actually selected.
    pub fn set_current_page(&mut self, index: usize) -> usize {
        let last = self.project.pages.len().saturating_sub(1);
        if index > last {
            debug!(index, last, "set_current_page: clamping out-of-range index");
        }
        let index = index.min(last);
        self.switch_page(index);
        index
    }

    /// Delete a page. The last remaining page cannot be removed.
    pub fn remove_page(&mut self, index: usize) -> bool {
        let count = self.project.pages.len();
        if index >= count || count == 1 {
            debug!(index, count, "remove_page: refused");
            return false;
        }
        self.project.pages.remove(index);
        let current = self.project.current_page_index;
        let next = if current > index { current - 1 } else { current.min(count - 2) };
        self.project.current_page_index = next;
        self.selection.clear();
        self.project.touch();
        info!(index, "page removed");
        true
    }

    pub fn rename_page(&mut self, index: usize, name: impl Into<String>) -> bool {
        let Some(page) = self.project.pages.get_mut(index) else {
            debug!(index, "rename_page: not found");
            return false;
        };
        page.name = name.into();
        self.project.touch();
        true
    }

    fn switch_page(&mut self, index: usize) {
        if self.project.current_page_index != index {
            self.selection.clear();
        }
        self.project.current_page_index = index;
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn with_element<F>(&mut self, id: &ElementId, op: &'static str, f: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        let Some(el) = self.project.current_page_mut().get_mut(id) else {
            debug!(%id, op, "element not found");
            return false;
        };
        f(el);
        self.project.touch();
        true
    }
}
