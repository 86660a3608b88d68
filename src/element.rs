//! Element model: the four element variants, their shared base record, and a
//! sparse-update type for property edits (`ElementPatch`).
//!
//! Elements serialize as a flat JSON object discriminated by `type`, with
//! camelCase keys, so a page snapshot looks the same as the document the host
//! application already stores:
//!
//! ```json
//! { "id": "…", "type": "panel", "name": "Panel", "transform": { … },
//!   "locked": false, "visible": true, "backgroundColor": "#ffffff", … }
//! ```

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Position, Size, Transform};

/// Unique identifier for an element, page, or project.
pub type ElementId = Uuid;

/// A canvas element: shared base fields plus variant-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique within the owning page.
    pub id: ElementId,
    /// Display label shown in the layers panel.
    pub name: String,
    pub transform: Transform,
    /// Locked elements ignore interactive move, resize, and delete.
    pub locked: bool,
    /// Hidden elements are neither rendered nor hit-tested.
    pub visible: bool,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Variant-specific element properties, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Panel(PanelProps),
    Image(ImageProps),
    Text(TextProps),
    Dialogue(DialogueProps),
}

/// Discriminant of [`ElementKind`], for callers that only need the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Panel,
    Image,
    Text,
    Dialogue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelProps {
    pub background_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub border_radius: f64,
    /// Ids of elements anchored inside this panel, in insertion order.
    #[serde(default)]
    pub children: Vec<ElementId>,
}

impl Default for PanelProps {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".into(),
            border_color: "#000000".into(),
            border_width: 2.0,
            border_radius: 0.0,
            children: Vec::new(),
        }
    }
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    /// Image URL. Empty means the "No Image" placeholder is shown.
    pub src: String,
    pub object_fit: ObjectFit,
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self { src: String::new(), object_fit: ObjectFit::Cover, opacity: 1.0, parent_id: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
    pub font_size: f64,
    pub font_family: String,
    /// CSS font weight (`"normal"`, `"bold"`, `"700"`, …).
    pub font_weight: String,
    pub color: String,
    pub text_align: TextAlign,
    pub line_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: "Text".into(),
            font_size: 16.0,
            font_family: "Arial".into(),
            font_weight: "normal".into(),
            color: "#000000".into(),
            text_align: TextAlign::Left,
            line_height: 1.2,
            parent_id: None,
        }
    }
}

/// Outline style of a dialogue bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleStyle {
    #[default]
    Rounded,
    Box,
    Cloud,
    Thought,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueProps {
    #[serde(flatten)]
    pub text: TextProps,
    pub background_color: String,
    pub border_color: String,
    pub stroke_size: f64,
    pub bubble_style: BubbleStyle,
    pub has_tail: bool,
    /// Fraction of the bubble width (0–1) locating the tail base.
    pub tail_angle: f64,
    /// Tail protrusion below the bubble body, in pixels.
    pub tail_length: f64,
}

impl Default for DialogueProps {
    fn default() -> Self {
        Self {
            text: TextProps { content: "Dialogue...".into(), text_align: TextAlign::Center, ..TextProps::default() },
            background_color: "#ffffff".into(),
            border_color: "#000000".into(),
            stroke_size: 2.0,
            bubble_style: BubbleStyle::Rounded,
            has_tail: true,
            tail_angle: 0.5,
            tail_length: 30.0,
        }
    }
}

impl ElementKind {
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Panel(_) => ElementType::Panel,
            Self::Image(_) => ElementType::Image,
            Self::Text(_) => ElementType::Text,
            Self::Dialogue(_) => ElementType::Dialogue,
        }
    }
}

impl ElementType {
    /// Default display label for a new element of this type.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Panel => "Panel",
            Self::Image => "Image",
            Self::Text => "Text",
            Self::Dialogue => "Dialogue",
        }
    }
}

impl Element {
    /// Build an element with default base fields around `kind`.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind, position: Position, size: Size) -> Self {
        Self {
            id,
            name: kind.element_type().label().to_string(),
            transform: Transform::new(position, size),
            locked: false,
            visible: true,
            kind,
        }
    }

    #[must_use]
    pub fn panel(id: ElementId, position: Position, size: Size) -> Self {
        Self::new(id, ElementKind::Panel(PanelProps::default()), position, size)
    }

    #[must_use]
    pub fn image(id: ElementId, position: Position, size: Size, src: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Image(ImageProps { src: src.into(), ..ImageProps::default() }), position, size)
    }

    #[must_use]
    pub fn text(id: ElementId, position: Position, size: Size) -> Self {
        Self::new(id, ElementKind::Text(TextProps::default()), position, size)
    }

    #[must_use]
    pub fn dialogue(id: ElementId, position: Position, size: Size) -> Self {
        Self::new(id, ElementKind::Dialogue(DialogueProps::default()), position, size)
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Owning panel, if this element is anchored to one. Panels never have a parent.
    #[must_use]
    pub fn parent_id(&self) -> Option<ElementId> {
        match &self.kind {
            ElementKind::Panel(_) => None,
            ElementKind::Image(p) => p.parent_id,
            ElementKind::Text(p) => p.parent_id,
            ElementKind::Dialogue(p) => p.text.parent_id,
        }
    }

    /// Set the owning panel. Returns false for panels, which cannot be nested.
    pub fn set_parent_id(&mut self, parent: Option<ElementId>) -> bool {
        match &mut self.kind {
            ElementKind::Panel(_) => return false,
            ElementKind::Image(p) => p.parent_id = parent,
            ElementKind::Text(p) => p.parent_id = parent,
            ElementKind::Dialogue(p) => p.text.parent_id = parent,
        }
        true
    }

    /// Child ids for panels; `None` for every other variant.
    #[must_use]
    pub fn children(&self) -> Option<&[ElementId]> {
        match &self.kind {
            ElementKind::Panel(p) => Some(&p.children),
            ElementKind::Image(_) | ElementKind::Text(_) | ElementKind::Dialogue(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ElementId>> {
        match &mut self.kind {
            ElementKind::Panel(p) => Some(&mut p.children),
            ElementKind::Image(_) | ElementKind::Text(_) | ElementKind::Dialogue(_) => None,
        }
    }

    /// Shallow-merge the present fields of `patch`. Fields that don't exist on
    /// this element's variant are ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(ref name) = patch.name {
            self.name.clone_from(name);
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(position) = patch.position {
            self.transform.position = position;
        }
        if let Some(size) = patch.size {
            self.transform.size = size;
        }
        if let Some(rotation) = patch.rotation {
            self.transform.rotation = rotation;
        }
        if let Some(z) = patch.z_index {
            self.transform.z_index = z;
        }

        match &mut self.kind {
            ElementKind::Panel(p) => {
                merge(&mut p.background_color, patch.background_color.as_ref());
                merge(&mut p.border_color, patch.border_color.as_ref());
                merge(&mut p.border_width, patch.border_width.as_ref());
                merge(&mut p.border_radius, patch.border_radius.as_ref());
            }
            ElementKind::Image(p) => {
                merge(&mut p.src, patch.src.as_ref());
                merge(&mut p.object_fit, patch.object_fit.as_ref());
                if let Some(opacity) = patch.opacity {
                    p.opacity = opacity.clamp(0.0, 1.0);
                }
            }
            ElementKind::Text(p) => p.apply_patch(patch),
            ElementKind::Dialogue(p) => {
                p.text.apply_patch(patch);
                merge(&mut p.background_color, patch.background_color.as_ref());
                merge(&mut p.border_color, patch.border_color.as_ref());
                merge(&mut p.stroke_size, patch.stroke_size.as_ref());
                merge(&mut p.bubble_style, patch.bubble_style.as_ref());
                merge(&mut p.has_tail, patch.has_tail.as_ref());
                if let Some(angle) = patch.tail_angle {
                    p.tail_angle = angle.clamp(0.0, 1.0);
                }
                merge(&mut p.tail_length, patch.tail_length.as_ref());
            }
        }
    }
}

impl TextProps {
    fn apply_patch(&mut self, patch: &ElementPatch) {
        merge(&mut self.content, patch.content.as_ref());
        merge(&mut self.font_size, patch.font_size.as_ref());
        merge(&mut self.font_family, patch.font_family.as_ref());
        merge(&mut self.font_weight, patch.font_weight.as_ref());
        merge(&mut self.color, patch.color.as_ref());
        merge(&mut self.text_align, patch.text_align.as_ref());
        merge(&mut self.line_height, patch.line_height.as_ref());
    }
}

fn merge<T: Clone>(target: &mut T, incoming: Option<&T>) {
    if let Some(value) = incoming {
        target.clone_from(value);
    }
}

/// Sparse update for an element. Only present fields are applied.
///
/// Parent/child links are deliberately absent: they are maintained by the
/// store's add/remove/attach operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    // Base fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,

    // Panel and dialogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,

    // Image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    // Text and dialogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,

    // Dialogue only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bubble_style: Option<BubbleStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_tail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_length: Option<f64>,
}
