//! Input event types
//!
//! [`InputEvent`]s are delivered by the host at window level. The
//! [`PointerRouter`](crate::PointerRouter) narrows pointer moves into
//! element-scoped [`ElementPointerEvent`]s.

use crate::tree::ElementId;

/// Window-level events consumed by the engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a client position
    PointerMoved {
        /// X position in client coordinates
        x: f32,
        /// Y position in client coordinates
        y: f32,
    },
    /// Pointer left the window
    PointerLeftWindow,
    /// Pointer entered the window
    PointerEnteredWindow,
    /// Page scroll offset changed (the tree already reflects it)
    Scrolled,
    /// Viewport size changed (the tree already reflects it)
    Resized,
}

/// Pointer events scoped to one tracked element
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementPointerEvent {
    /// Pointer entered the element's bounds
    Enter { element: ElementId },
    /// Pointer moved within the element's bounds (client coordinates)
    Move { element: ElementId, x: f32, y: f32 },
    /// Pointer left the element's bounds
    Leave { element: ElementId },
}

impl ElementPointerEvent {
    pub fn element(&self) -> ElementId {
        match self {
            ElementPointerEvent::Enter { element }
            | ElementPointerEvent::Move { element, .. }
            | ElementPointerEvent::Leave { element } => *element,
        }
    }
}
