//! Smoothed cursor marker
//!
//! A marker element is created under the body and, every frame, moved a
//! fixed fraction of the way toward the latest pointer sample. The marker is
//! written every frame whether or not the pointer moved.

use glint_animation::Smoothed;
use glint_core::{ElementId, Point, VisualTree};

use crate::config::CursorConfig;

#[derive(Debug)]
pub struct CursorFollower {
    marker: ElementId,
    position: Smoothed<Point>,
    visible: bool,
}

impl CursorFollower {
    /// Create the marker element and start at the origin
    pub fn new<T: VisualTree + ?Sized>(
        tree: &mut T,
        config: &CursorConfig,
    ) -> glint_core::Result<Self> {
        let body = tree.body();
        let marker = tree.create_element(body, &config.marker_class)?;
        tracing::debug!("cursor marker {:?} created", marker);
        Ok(Self {
            marker,
            position: Smoothed::new(Point::ZERO, config.smoothing),
            visible: true,
        })
    }

    pub fn marker(&self) -> ElementId {
        self.marker
    }

    pub fn position(&self) -> Point {
        *self.position.current()
    }

    /// Latest pointer sample
    pub fn sample(&self) -> Point {
        *self.position.target()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record a pointer sample; only the latest one is kept
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.position.set_target(Point::new(x, y));
    }

    /// Advance one frame and write the marker position
    pub fn tick<T: VisualTree + ?Sized>(&mut self, tree: &mut T) -> Point {
        let position = *self.position.step();
        match tree.style_mut(self.marker) {
            Ok(style) => {
                style.left = Some(position.x);
                style.top = Some(position.y);
            }
            Err(err) => tracing::trace!("cursor marker not written: {}", err),
        }
        position
    }

    pub fn on_pointer_left_window<T: VisualTree + ?Sized>(&mut self, tree: &mut T) {
        self.set_visible(tree, false);
    }

    pub fn on_pointer_entered_window<T: VisualTree + ?Sized>(&mut self, tree: &mut T) {
        self.set_visible(tree, true);
    }

    fn set_visible<T: VisualTree + ?Sized>(&mut self, tree: &mut T, visible: bool) {
        self.visible = visible;
        match tree.style_mut(self.marker) {
            Ok(style) => style.opacity = Some(if visible { 1.0 } else { 0.0 }),
            Err(err) => tracing::trace!("cursor marker not written: {}", err),
        }
    }
}
