//! Icon element.

use super::ElementId;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Icon glyph tag.
///
/// The wire format stores the tag string in the element content column, so
/// the kebab-case forms here are part of the persisted schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconTag {
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Check,
    X,
    Plus,
    Minus,
    Search,
    #[default]
    User,
}

impl IconTag {
    /// String form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            IconTag::ArrowDown => "arrow-down",
            IconTag::ArrowLeft => "arrow-left",
            IconTag::ArrowRight => "arrow-right",
            IconTag::ArrowUp => "arrow-up",
            IconTag::Check => "check",
            IconTag::X => "x",
            IconTag::Plus => "plus",
            IconTag::Minus => "minus",
            IconTag::Search => "search",
            IconTag::User => "user",
        }
    }

    /// Parse a wire value, falling back to `User` for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "arrow-down" => IconTag::ArrowDown,
            "arrow-left" => IconTag::ArrowLeft,
            "arrow-right" => IconTag::ArrowRight,
            "arrow-up" => IconTag::ArrowUp,
            "check" => IconTag::Check,
            "x" => IconTag::X,
            "plus" => IconTag::Plus,
            "minus" => IconTag::Minus,
            "search" => IconTag::Search,
            _ => IconTag::User,
        }
    }

    /// All available glyph tags.
    pub fn all() -> &'static [IconTag] {
        &[
            IconTag::ArrowDown,
            IconTag::ArrowLeft,
            IconTag::ArrowRight,
            IconTag::ArrowUp,
            IconTag::Check,
            IconTag::X,
            IconTag::Plus,
            IconTag::Minus,
            IconTag::Search,
            IconTag::User,
        ]
    }
}

/// A positioned icon glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconElement {
    pub(crate) id: ElementId,
    /// Top-left corner, canvas-relative.
    pub position: Point,
    /// Display size in pixels.
    pub size: Size,
    /// Glyph tag.
    pub tag: IconTag,
}

impl IconElement {
    /// Create a new icon element.
    pub fn new(position: Point, size: Size, tag: IconTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            size,
            tag,
        }
    }
}
