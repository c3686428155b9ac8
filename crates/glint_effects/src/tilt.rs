//! Pointer-relative card tilt
//!
//! Stateless between events: every pointer move inside a card recomputes the
//! rotation from the card's current bounds, and leaving the card resets it.

use glint_core::{
    ElementPointerEvent, ElementSet, ElementTransform, PointerRouter, Rect, Transform3d, VisualTree,
};

use crate::config::TiltConfig;

/// Rotation for a pointer at client position `(x, y)` over a card
///
/// `rotate_x = (y - cy) / divisor` and `rotate_y = (cx - x) / divisor`, where
/// `(cx, cy)` is the card centre relative to its top-left corner.
pub fn tilt_for(bounds: Rect, x: f32, y: f32, config: &TiltConfig) -> Transform3d {
    let local_x = x - bounds.x();
    let local_y = y - bounds.y();
    let center_x = bounds.width() / 2.0;
    let center_y = bounds.height() / 2.0;

    Transform3d {
        perspective: config.perspective,
        rotate_x: (local_y - center_y) / config.divisor,
        rotate_y: (center_x - local_x) / config.divisor,
        translate_y: -config.lift,
    }
}

#[derive(Debug)]
pub struct TiltController {
    router: PointerRouter,
    config: TiltConfig,
}

impl TiltController {
    pub fn new(cards: ElementSet, config: &TiltConfig) -> Self {
        tracing::debug!("tilt controller tracking {} card(s)", cards.len());
        Self {
            router: PointerRouter::new(cards),
            config: config.clone(),
        }
    }

    pub fn cards(&self) -> &ElementSet {
        self.router.targets()
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    /// Route a window-level pointer move to the cards under it
    pub fn on_pointer_move<T: VisualTree + ?Sized>(&mut self, tree: &mut T, x: f32, y: f32) {
        for event in self.router.on_pointer_move(tree, x, y) {
            self.handle(tree, event);
        }
    }

    /// The pointer left the window: every hovered card is left
    pub fn on_pointer_exit<T: VisualTree + ?Sized>(&mut self, tree: &mut T) {
        for event in self.router.on_pointer_exit() {
            self.handle(tree, event);
        }
    }

    /// Apply one card-scoped pointer event
    pub fn handle<T: VisualTree + ?Sized>(&self, tree: &mut T, event: ElementPointerEvent) {
        let transform = match event {
            ElementPointerEvent::Enter { .. } => return,
            ElementPointerEvent::Move { element, x, y } => {
                let Some(bounds) = tree.bounds(element) else {
                    return;
                };
                tilt_for(bounds, x, y, &self.config)
            }
            ElementPointerEvent::Leave { .. } => Transform3d::neutral(self.config.perspective),
        };

        match tree.style_mut(event.element()) {
            Ok(style) => style.transform = Some(ElementTransform::Rotate3d(transform)),
            Err(err) => tracing::trace!("tilt not applied: {}", err),
        }
    }

    /// Reset every card to the neutral transform
    pub fn reset_all<T: VisualTree + ?Sized>(&mut self, tree: &mut T) {
        self.router.on_pointer_exit();
        let neutral = ElementTransform::Rotate3d(Transform3d::neutral(self.config.perspective));
        for card in self.router.targets().iter() {
            if let Ok(style) = tree.style_mut(card) {
                style.transform = Some(neutral);
            }
        }
    }
}
