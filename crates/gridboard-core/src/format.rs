//! Inline text formatting collaborator seam.
//!
//! Rich-text commands (bold, italic, underline) are owned by the embedding
//! UI; the core only persists whatever content string the collaborator
//! produces.

/// Inline style applied to a text selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
}

/// Capability for applying an inline style to text content.
///
/// Implemented by the embedding layer (e.g. over a contenteditable
/// surface); injected where content edits originate rather than reached
/// for as ambient state.
pub trait InlineStyleFormatter {
    /// Apply `style` to `content` and return the resulting content string.
    fn apply(&self, content: &str, style: InlineStyle) -> String;
}
