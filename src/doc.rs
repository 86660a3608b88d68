//! Document model: pages of elements and the project that owns them.
//!
//! A `Page` keeps its elements in insertion order; paint order is derived by
//! sorting on `transform.z_index` (ties keep insertion order). A `Project`
//! always holds at least one page and a valid `current_page_index`.
//!
//! Data flows into this layer from the host (JSON snapshots via
//! [`Project::from_json`]) and from the store's mutation operations. Renderers
//! read paint order through [`Page::sorted_elements`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::consts::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::element::{Element, ElementId};
use crate::error::CanvasError;

/// One manga page: a fixed-size sheet holding elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub name: String,
    pub elements: Vec<Element>,
    pub background_color: String,
    pub width: f64,
    pub height: f64,
}

impl Page {
    /// Create an empty white page with the default dimensions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            elements: Vec::new(),
            background_color: "#ffffff".into(),
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
        }
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == *id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == *id)
    }

    /// Index of the element in the insertion-ordered list.
    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Elements in paint order (bottom first). Ties keep insertion order.
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&Element> {
        let mut els: Vec<&Element> = self.elements.iter().collect();
        els.sort_by_key(|el| el.transform.z_index);
        els
    }

    /// Highest z-index on the page, or `None` for an empty page.
    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.elements.iter().map(|el| el.transform.z_index).max()
    }

    /// Lowest z-index on the page, or `None` for an empty page.
    #[must_use]
    pub fn min_z(&self) -> Option<i64> {
        self.elements.iter().map(|el| el.transform.z_index).min()
    }

    /// First duplicated element id, if any.
    #[must_use]
    pub fn duplicate_id(&self) -> Option<ElementId> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        self.elements.iter().map(|el| el.id).find(|id| !seen.insert(*id))
    }

    /// Make every panel's `children` agree with its children's `parent_id`.
    ///
    /// Children whose element is gone or points elsewhere are pruned; elements
    /// pointing at a missing or non-panel parent lose their `parent_id`; and
    /// elements pointing at a panel are appended to its `children` if absent.
    pub fn sync_parent_links(&mut self) {
        let panels: HashSet<ElementId> =
            self.elements.iter().filter(|el| el.children().is_some()).map(|el| el.id).collect();

        for el in &mut self.elements {
            if let Some(parent) = el.parent_id() {
                if !panels.contains(&parent) {
                    el.set_parent_id(None);
                }
            }
        }

        let links: Vec<(ElementId, ElementId)> = self
            .elements
            .iter()
            .filter_map(|el| el.parent_id().map(|parent| (parent, el.id)))
            .collect();

        for panel in &mut self.elements {
            let panel_id = panel.id;
            let Some(children) = panel.children_mut() else {
                continue;
            };
            children.retain(|child| links.contains(&(panel_id, *child)));
            let mut seen = HashSet::new();
            children.retain(|child| seen.insert(*child));
            for (_, child) in links.iter().filter(|(parent, _)| *parent == panel_id) {
                if !children.contains(child) {
                    children.push(*child);
                }
            }
        }
    }
}

/// A manga project: an ordered list of pages, one of which is being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub pages: Vec<Page>,
    pub current_page_index: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Project {
    /// Create a project with a single blank page.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pages: vec![Page::new("Page 1")],
            current_page_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The page being edited.
    ///
    /// `pages` is never empty and `current_page_index` is kept in range by
    /// every mutation, so the index is always valid.
    #[must_use]
    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_page_index]
    }

    pub fn current_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.current_page_index]
    }

    /// Give the project at least one page and a `current_page_index` in range.
    pub fn ensure_current_page(&mut self) {
        if self.pages.is_empty() {
            tracing::warn!("project has no pages; adding a blank page");
            self.pages.push(Page::new("Page 1"));
        }
        if self.current_page_index >= self.pages.len() {
            tracing::warn!(
                index = self.current_page_index,
                pages = self.pages.len(),
                "current page index out of range; clamping"
            );
            self.current_page_index = self.pages.len() - 1;
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }

    /// Whether `id` is used by an element on any page.
    #[must_use]
    pub fn contains_element(&self, id: &ElementId) -> bool {
        self.pages.iter().any(|page| page.contains(id))
    }

    /// Serialize to the camelCase JSON document the host stores.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, CanvasError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed variant of [`Project::to_json`].
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, CanvasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a project document.
    ///
    /// An out-of-range `currentPageIndex` is clamped and panel/child links are
    /// repaired; an empty page list or a duplicated element id is rejected.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input, `InvalidProject` for an empty page
    /// list, and `DuplicateElementId` when a page reuses an element id.
    pub fn from_json(text: &str) -> Result<Self, CanvasError> {
        let mut project: Self = serde_json::from_str(text)?;
        project.validate()?;
        Ok(project)
    }

    fn validate(&mut self) -> Result<(), CanvasError> {
        if self.pages.is_empty() {
            return Err(CanvasError::InvalidProject("project has no pages".into()));
        }
        for (index, page) in self.pages.iter_mut().enumerate() {
            if let Some(id) = page.duplicate_id() {
                return Err(CanvasError::DuplicateElementId { page: index, id });
            }
            page.sync_parent_links();
        }
        self.ensure_current_page();
        Ok(())
    }
}
