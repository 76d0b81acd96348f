//! Layout document and its mutation API.

use crate::element::{Element, ElementId, IconTag, TextAlign, TextSize};
use crate::format::{InlineStyle, InlineStyleFormatter};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// A partial element update, shallow-merged by [`Document::update_element`].
///
/// Variant-specific fields apply only to their owning kind: a `text_align`
/// patch against an image is dropped rather than stored.
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub content: Option<String>,
    pub text_align: Option<TextAlign>,
    pub text_size: Option<TextSize>,
    pub icon_tag: Option<IconTag>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn text_size(mut self, text_size: TextSize) -> Self {
        self.text_size = Some(text_size);
        self
    }

    pub fn icon_tag(mut self, tag: IconTag) -> Self {
        self.icon_tag = Some(tag);
        self
    }
}

/// The in-memory document: an ordered collection of elements.
///
/// Insertion order is paint order and nothing more. The document trusts
/// callers (factory, interaction engine) to supply geometry that already
/// satisfies the canvas invariants; it does not re-validate on every write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    elements: Vec<Element>,
    /// Set by any local mutation; cleared only by successful load or save.
    #[serde(skip)]
    unsaved_changes: bool,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, marking the document dirty.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
        self.unsaved_changes = true;
    }

    /// Shallow-merge `patch` into the element with the given id.
    ///
    /// Returns `false` (and stays clean) when the id is unknown.
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|el| el.id() == id) else {
            return false;
        };

        if let Some(position) = patch.position {
            element.set_position(position);
        }
        if let Some(size) = patch.size {
            element.set_size(size);
        }
        match element {
            Element::Text(text) => {
                if let Some(content) = patch.content {
                    text.content = content;
                }
                if let Some(align) = patch.text_align {
                    text.align = align;
                }
                if let Some(text_size) = patch.text_size {
                    text.text_size = text_size;
                }
            }
            Element::Image(image) => {
                if let Some(content) = patch.content {
                    image.address = content;
                }
            }
            Element::Icon(icon) => {
                if let Some(tag) = patch.icon_tag {
                    icon.tag = tag;
                }
            }
        }

        self.unsaved_changes = true;
        true
    }

    /// Remove an element by id. No-op on unknown ids.
    pub fn delete_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|el| el.id() == id)?;
        self.unsaved_changes = true;
        Some(self.elements.remove(index))
    }

    /// Run the injected inline-style collaborator over a text element's
    /// content and persist whatever string it produces.
    pub fn apply_inline_style(
        &mut self,
        id: ElementId,
        formatter: &dyn InlineStyleFormatter,
        style: InlineStyle,
    ) -> bool {
        let Some(Element::Text(text)) = self.elements.iter().find(|el| el.id() == id) else {
            return false;
        };
        let content = formatter.apply(&text.content, style);
        self.update_element(id, ElementPatch::new().content(content))
    }

    /// Elements in insertion (paint) order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == id)
    }

    /// Replace the whole element set, clearing the dirty flag.
    ///
    /// Used by the sync engine when a remote load lands.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.unsaved_changes = false;
    }

    /// Clear the dirty flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.unsaved_changes = false;
    }

    /// Whether any local mutation has happened since the last load/save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
