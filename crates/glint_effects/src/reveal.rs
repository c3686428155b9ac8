//! Staggered scroll reveal
//!
//! Each tracked element is revealed once, the first time it becomes visible:
//! a transition delay is written, then the visible class is added so the
//! host's transition runs. The delay is the element's own `animation_delay`
//! when it declares one, else `order_index × stagger_step` where the order
//! index is the element's position in the scan taken at registration.

use std::time::Duration;

use glint_core::{ElementId, ElementSet, VisualTree};
use slotmap::SecondaryMap;

use crate::config::RevealConfig;
use crate::intersection::{IntersectionEntry, IntersectionObserver};

/// Per-element reveal latch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealState {
    /// Position in scan order at registration
    pub order_index: usize,
    /// Set once, never cleared
    pub triggered: bool,
}

#[derive(Debug)]
pub struct RevealController {
    observer: IntersectionObserver,
    states: SecondaryMap<ElementId, RevealState>,
    stagger_step: Duration,
    visible_class: String,
}

impl RevealController {
    pub fn new(elements: &ElementSet, config: &RevealConfig) -> Self {
        let mut observer = IntersectionObserver::new(config.threshold);
        let mut states = SecondaryMap::new();
        for (order_index, id) in elements.iter().enumerate() {
            observer.observe(id);
            states.insert(
                id,
                RevealState {
                    order_index,
                    triggered: false,
                },
            );
        }
        tracing::debug!("reveal controller tracking {} element(s)", states.len());

        Self {
            observer,
            states,
            stagger_step: Duration::from_millis(config.stagger_step_ms),
            visible_class: config.visible_class.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.states.get(id).copied()
    }

    pub fn is_triggered(&self, id: ElementId) -> bool {
        self.states.get(id).is_some_and(|s| s.triggered)
    }

    /// Delay an element receives when revealed
    pub fn delay_for<T: VisualTree + ?Sized>(&self, tree: &T, id: ElementId) -> Option<Duration> {
        let state = self.states.get(id)?;
        let explicit = tree.style(id).and_then(|s| s.animation_delay);
        Some(explicit.unwrap_or(self.stagger_step * state.order_index as u32))
    }

    /// Measure visibility and reveal newly visible elements
    ///
    /// Returns the number of elements revealed by this call.
    pub fn update<T: VisualTree + ?Sized>(&mut self, tree: &mut T) -> usize {
        let entries = self.observer.update(tree);
        entries
            .into_iter()
            .filter(|entry| self.on_intersection(tree, entry))
            .count()
    }

    /// Handle one visibility notification; repeated notifications are no-ops
    pub fn on_intersection<T: VisualTree + ?Sized>(
        &mut self,
        tree: &mut T,
        entry: &IntersectionEntry,
    ) -> bool {
        if !entry.is_intersecting {
            return false;
        }
        self.reveal(tree, entry.element)
    }

    /// Reveal an element now, regardless of its visibility
    pub fn reveal<T: VisualTree + ?Sized>(&mut self, tree: &mut T, id: ElementId) -> bool {
        if self.is_triggered(id) {
            return false;
        }
        let Some(delay) = self.delay_for(tree, id) else {
            return false;
        };
        if let Some(state) = self.states.get_mut(id) {
            state.triggered = true;
        }

        match mark_visible(tree, id, delay, &self.visible_class) {
            Ok(()) => {
                tracing::debug!("revealed {:?} after {:?}", id, delay);
                true
            }
            Err(err) => {
                tracing::debug!("reveal skipped: {}", err);
                false
            }
        }
    }
}

fn mark_visible<T: VisualTree + ?Sized>(
    tree: &mut T,
    id: ElementId,
    delay: Duration,
    class: &str,
) -> glint_core::Result<()> {
    tree.style_mut(id)?.transition_delay = Some(delay);
    tree.add_class(id, class)
}
