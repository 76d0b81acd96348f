//! Element definitions for the layout canvas.

mod icon;
mod image;
mod text;

pub use icon::{IconElement, IconTag};
pub use image::ImageElement;
pub use text::{TextAlign, TextElement, TextSize};

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Element kind discriminant, as stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Icon,
}

/// A positioned, sized visual primitive: the unit of placement and
/// persistence.
///
/// Variant-specific fields live only on their owning variant, so callers
/// dispatch exhaustively instead of ignoring optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
    Icon(IconElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Text(el) => el.id,
            Element::Image(el) => el.id,
            Element::Icon(el) => el.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
            Element::Icon(_) => ElementKind::Icon,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Element::Text(el) => el.position,
            Element::Image(el) => el.position,
            Element::Icon(el) => el.position,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Element::Text(el) => el.size,
            Element::Image(el) => el.size,
            Element::Icon(el) => el.size,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Element::Text(el) => el.position = position,
            Element::Image(el) => el.position = position,
            Element::Icon(el) => el.position = position,
        }
    }

    pub fn set_size(&mut self, size: Size) {
        match self {
            Element::Text(el) => el.size = size,
            Element::Image(el) => el.size = size,
            Element::Icon(el) => el.size = size,
        }
    }

    /// Content string as persisted on the wire: text HTML, asset address,
    /// or icon tag.
    pub fn content(&self) -> &str {
        match self {
            Element::Text(el) => &el.content,
            Element::Image(el) => &el.address,
            Element::Icon(el) => el.tag.as_str(),
        }
    }

    /// Translate the element by `delta`.
    pub fn offset_by(&mut self, delta: Vec2) {
        let pos = self.position();
        self.set_position(Point::new(pos.x + delta.x, pos.y + delta.y));
    }

    /// Give the element a fresh unique identifier.
    ///
    /// Used when duplicating so the clone never collides with the source.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Element::Text(el) => el.id = new_id,
            Element::Image(el) => el.id = new_id,
            Element::Icon(el) => el.id = new_id,
        }
    }

    /// Get the text variant if this element is text.
    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(el) => Some(el),
            _ => None,
        }
    }

    /// Get the image variant if this element is an image.
    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Element::Image(el) => Some(el),
            _ => None,
        }
    }

    /// Get the icon variant if this element is an icon.
    pub fn as_icon(&self) -> Option<&IconElement> {
        match self {
            Element::Icon(el) => Some(el),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_per_variant() {
        let text = Element::Text(TextElement::new(
            Point::ZERO,
            Size::new(150.0, 50.0),
            "hello".to_string(),
        ));
        assert_eq!(text.content(), "hello");

        let image = Element::Image(ImageElement::new(
            Point::ZERO,
            Size::new(150.0, 150.0),
            "store://a.png".to_string(),
        ));
        assert_eq!(image.content(), "store://a.png");

        let icon = Element::Icon(IconElement::new(
            Point::ZERO,
            Size::new(50.0, 50.0),
            IconTag::Check,
        ));
        assert_eq!(icon.content(), "check");
    }

    #[test]
    fn test_offset_by() {
        let mut el = Element::Icon(IconElement::new(
            Point::new(10.0, 20.0),
            Size::new(50.0, 50.0),
            IconTag::Plus,
        ));
        el.offset_by(Vec2::new(20.0, 20.0));
        assert_eq!(el.position(), Point::new(30.0, 40.0));
    }

    #[test]
    fn test_regenerate_id_changes_id() {
        let mut el = Element::Text(TextElement::new(
            Point::ZERO,
            Size::new(150.0, 50.0),
            String::new(),
        ));
        let old = el.id();
        el.regenerate_id();
        assert_ne!(el.id(), old);
    }
}
