//! Pointer-driven drag/resize state machine.
//!
//! The engine receives classified pointer events from the embedding layer
//! (which owns hit testing and never forwards toolbar chrome) and mutates
//! the document through the same update path toolbars use. The document,
//! not a transient view transform, is the live source of truth during a
//! gesture: every pointer move emits a snapped, clamped patch, so losing
//! pointer capture mid-gesture simply freezes the element at its last
//! committed, valid geometry.

use crate::document::{Document, ElementPatch};
use crate::element::ElementId;
use crate::grid::{
    self, CANVAS_WIDTH, COLUMN_WIDTH, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH,
};
use kurbo::{Point, Size, Vec2};

/// What a pointer-down landed on, as classified by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHit {
    /// The body of an element (not its resize affordance).
    Body(ElementId),
    /// The resize affordance of an element.
    Handle(ElementId),
    /// Neither an element body nor toolbar chrome.
    Outside,
}

/// Active gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        element: ElementId,
        /// Pointer position minus element position at drag start.
        anchor: Vec2,
    },
    Resizing {
        element: ElementId,
        /// Pointer position at resize start.
        origin: Point,
        /// Element size at resize start.
        start_size: Size,
    },
}

/// Drag/resize state machine plus selection state.
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    gesture: Gesture,
    selected: Option<ElementId>,
    preview: bool,
}

impl InteractionEngine {
    /// Create a new engine in the idle state.
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            selected: None,
            preview: false,
        }
    }

    /// Current gesture state.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Currently selected element, if any.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Whether preview mode is active.
    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Whether the embedder should have pointer-move listeners attached.
    ///
    /// True only mid-gesture; listeners are detached again on pointer-up to
    /// bound their lifetime.
    pub fn wants_pointer_moves(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Handle a pointer-down that the embedder has already classified.
    pub fn pointer_down(&mut self, doc: &Document, hit: PointerHit, pos: Point) {
        if self.preview {
            return;
        }

        match hit {
            PointerHit::Body(id) => {
                let Some(element) = doc.get(id) else {
                    return;
                };
                self.selected = Some(id);
                let origin = element.position();
                self.gesture = Gesture::Dragging {
                    element: id,
                    anchor: Vec2::new(pos.x - origin.x, pos.y - origin.y),
                };
            }
            PointerHit::Handle(id) => {
                let Some(element) = doc.get(id) else {
                    return;
                };
                self.gesture = Gesture::Resizing {
                    element: id,
                    origin: pos,
                    start_size: element.size(),
                };
            }
            PointerHit::Outside => {
                self.selected = None;
            }
        }
    }

    /// Handle a pointer move, emitting a geometry patch when a gesture is
    /// active.
    pub fn pointer_move(&mut self, doc: &mut Document, pos: Point) {
        if self.preview {
            return;
        }

        match self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging { element, anchor } => {
                let Some(el) = doc.get(element) else {
                    self.gesture = Gesture::Idle;
                    return;
                };
                let raw = Point::new(pos.x - anchor.x, pos.y - anchor.y);
                // Only x snaps to the grid; y moves freely.
                let snapped = Point::new(grid::snap_x(raw.x, COLUMN_WIDTH), raw.y);
                let clamped = grid::clamp_position(snapped, el.size(), CANVAS_WIDTH);
                doc.update_element(element, ElementPatch::new().position(clamped));
            }
            Gesture::Resizing {
                element,
                origin,
                start_size,
            } => {
                let Some(el) = doc.get(element) else {
                    self.gesture = Gesture::Idle;
                    return;
                };
                let delta = Vec2::new(pos.x - origin.x, pos.y - origin.y);
                let size = grid::clamp_size(
                    start_size.width + delta.x,
                    start_size.height + delta.y,
                    MIN_ELEMENT_WIDTH,
                    MIN_ELEMENT_HEIGHT,
                    CANVAS_WIDTH,
                    el.position().x,
                );
                doc.update_element(element, ElementPatch::new().size(size));
            }
        }
    }

    /// Handle a pointer-up anywhere: the last emitted update stands.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Explicitly set (or clear) the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        if self.preview {
            return;
        }
        self.selected = id;
    }

    /// Tell the engine an element was deleted so a stale selection or
    /// gesture never outlives it.
    pub fn notify_deleted(&mut self, id: ElementId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        match self.gesture {
            Gesture::Dragging { element, .. } | Gesture::Resizing { element, .. }
                if element == id =>
            {
                self.gesture = Gesture::Idle;
            }
            _ => {}
        }
    }

    /// Enter or leave preview mode.
    ///
    /// Entering forcibly idles any gesture and clears the selection;
    /// pointer handling stays disabled until preview exits.
    pub fn set_preview_mode(&mut self, preview: bool) {
        self.preview = preview;
        if preview {
            self.gesture = Gesture::Idle;
            self.selected = None;
        }
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}
