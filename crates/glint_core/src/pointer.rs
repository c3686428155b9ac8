//! Pointer routing from window input to tracked elements
//!
//! ```text
//! Window pointer move (x, y)
//!     ↓
//! PointerRouter (hit testing, hover tracking)
//!     ↓
//! Element events (Enter / Move / Leave)
//! ```
//!
//! Only the elements the router was built with are hit-tested. Overlapping
//! tracked elements are all considered hovered.

use rustc_hash::FxHashSet;

use crate::geometry::Point;
use crate::input::ElementPointerEvent;
use crate::selector::ElementSet;
use crate::tree::{ElementId, VisualTree};

/// Routes window pointer positions to a fixed set of tracked elements
#[derive(Clone, Debug, Default)]
pub struct PointerRouter {
    targets: ElementSet,
    /// Elements currently under the pointer (for enter/leave tracking)
    hovered: FxHashSet<ElementId>,
    position: Option<Point>,
}

impl PointerRouter {
    pub fn new(targets: ElementSet) -> Self {
        Self {
            targets,
            hovered: FxHashSet::default(),
            position: None,
        }
    }

    pub fn targets(&self) -> &ElementSet {
        &self.targets
    }

    /// Last routed pointer position
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_hovered(&self, id: ElementId) -> bool {
        self.hovered.contains(&id)
    }

    /// Handle a pointer move
    ///
    /// Returns leave events first, then enter events, then a move event for
    /// every hovered element, each group in tracked order.
    pub fn on_pointer_move<T: VisualTree + ?Sized>(
        &mut self,
        tree: &T,
        x: f32,
        y: f32,
    ) -> Vec<ElementPointerEvent> {
        let point = Point::new(x, y);
        self.position = Some(point);

        let current: Vec<ElementId> = self
            .targets
            .iter()
            .filter(|id| tree.bounds(*id).is_some_and(|b| b.contains(point)))
            .collect();

        let mut events = Vec::new();

        for id in self.targets.iter() {
            if self.hovered.contains(&id) && !current.contains(&id) {
                events.push(ElementPointerEvent::Leave { element: id });
            }
        }
        for id in &current {
            if !self.hovered.contains(id) {
                events.push(ElementPointerEvent::Enter { element: *id });
            }
        }
        for id in &current {
            events.push(ElementPointerEvent::Move { element: *id, x, y });
        }

        self.hovered = current.into_iter().collect();
        events
    }

    /// Handle the pointer leaving the window: every hovered element is left
    pub fn on_pointer_exit(&mut self) -> Vec<ElementPointerEvent> {
        self.position = None;
        let events: Vec<ElementPointerEvent> = self
            .targets
            .iter()
            .filter(|id| self.hovered.contains(id))
            .map(|element| ElementPointerEvent::Leave { element })
            .collect();
        self.hovered.clear();
        events
    }
}
