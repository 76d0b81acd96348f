//! Text element.

use super::ElementId;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// String form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Text size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextSize {
    S,
    #[default]
    M,
    L,
    XL,
}

impl TextSize {
    /// String form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSize::S => "S",
            TextSize::M => "M",
            TextSize::L => "L",
            TextSize::XL => "XL",
        }
    }

    /// Parse a wire value, falling back to `M` for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "S" => TextSize::S,
            "M" => TextSize::M,
            "L" => TextSize::L,
            "XL" => TextSize::XL,
            _ => TextSize::M,
        }
    }
}

/// A positioned block of rich text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub(crate) id: ElementId,
    /// Top-left corner, canvas-relative.
    pub position: Point,
    /// Display size in pixels.
    pub size: Size,
    /// HTML or plain-text content.
    pub content: String,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Size class.
    pub text_size: TextSize,
}

impl TextElement {
    /// Create a new text element.
    pub fn new(position: Point, size: Size, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            size,
            content,
            align: TextAlign::default(),
            text_size: TextSize::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_parse_lenient() {
        assert_eq!(TextSize::parse_lenient("XL"), TextSize::XL);
        assert_eq!(TextSize::parse_lenient("S"), TextSize::S);
        assert_eq!(TextSize::parse_lenient("huge"), TextSize::M);
        assert_eq!(TextSize::parse_lenient(""), TextSize::M);
    }

    #[test]
    fn test_new_text_has_unique_id() {
        let a = TextElement::new(Point::ZERO, Size::new(150.0, 50.0), String::new());
        let b = TextElement::new(Point::ZERO, Size::new(150.0, 50.0), String::new());
        assert_ne!(a.id, b.id);
    }
}
