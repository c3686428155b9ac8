//! Inline style properties written by the engine
//!
//! Only the properties the engine actually mutates are modelled. Everything
//! else about an element's appearance belongs to the host's style sheets.

use std::fmt;
use std::time::Duration;

/// A 3D card rotation with perspective and a vertical lift
///
/// Renders as `perspective(1000px) rotateX(2deg) rotateY(-1.5deg) translateY(-10px)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Perspective depth in pixels
    pub perspective: f32,
    /// Rotation around the X axis in degrees
    pub rotate_x: f32,
    /// Rotation around the Y axis in degrees
    pub rotate_y: f32,
    /// Vertical translation in pixels (negative lifts the element)
    pub translate_y: f32,
}

impl Transform3d {
    /// Zero rotation, zero translation at the given perspective
    pub fn neutral(perspective: f32) -> Self {
        Self {
            perspective,
            rotate_x: 0.0,
            rotate_y: 0.0,
            translate_y: 0.0,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.rotate_x == 0.0 && self.rotate_y == 0.0 && self.translate_y == 0.0
    }
}

impl fmt::Display for Transform3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateY({}px)",
            self.perspective, self.rotate_x, self.rotate_y, self.translate_y
        )
    }
}

/// Transform value of an element
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementTransform {
    /// Perspective rotation (tilt cards)
    Rotate3d(Transform3d),
    /// Plain 2D translation in pixels
    Translate { x: f32, y: f32 },
}

impl fmt::Display for ElementTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementTransform::Rotate3d(t) => t.fmt(f),
            ElementTransform::Translate { x, y } => write!(f, "translate({}px, {}px)", x, y),
        }
    }
}

/// Inline style of one element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    pub transform: Option<ElementTransform>,
    pub opacity: Option<f32>,
    pub transition_delay: Option<Duration>,
    /// Explicit per-element delay declared by the page author
    pub animation_delay: Option<Duration>,
    pub left: Option<f32>,
    pub top: Option<f32>,
}

impl InlineStyle {
    pub fn is_empty(&self) -> bool {
        *self == InlineStyle::default()
    }

    /// Render the set properties as CSS declarations
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();
        if let Some(left) = self.left {
            decls.push(format!("left: {}px", left));
        }
        if let Some(top) = self.top {
            decls.push(format!("top: {}px", top));
        }
        if let Some(opacity) = self.opacity {
            decls.push(format!("opacity: {}", opacity));
        }
        if let Some(transform) = &self.transform {
            decls.push(format!("transform: {}", transform));
        }
        if let Some(delay) = self.animation_delay {
            decls.push(format!("animation-delay: {}", format_seconds(delay)));
        }
        if let Some(delay) = self.transition_delay {
            decls.push(format!("transition-delay: {}", format_seconds(delay)));
        }
        decls.join("; ")
    }
}

/// Format a duration the way CSS time values are usually written (`0.2s`)
pub fn format_seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs_f64())
}
