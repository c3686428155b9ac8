//! Animatable value types
//!
//! Linear interpolation for the value types the engine animates, and
//! [`Smoothed`], a frame-stepped exponential follower.

use glint_core::Point;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Distance metric used for settling checks
    fn distance(&self, other: &Self) -> f32;
}

// ============================================================================
// f32 / f64 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn distance(&self, other: &Self) -> f32 {
        (self - other).abs()
    }
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t as f64
    }

    fn distance(&self, other: &Self) -> f32 {
        (self - other).abs() as f32
    }
}

// ============================================================================
// Point Implementation
// ============================================================================

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn distance(&self, other: &Self) -> f32 {
        Point::distance(self, *other)
    }
}

// ============================================================================
// Exponential smoothing
// ============================================================================

/// A value that chases a target by a fixed fraction of the gap each step
///
/// `current += (target - current) * factor` per step. The decay is per step,
/// not per unit time, so the apparent speed depends on the frame rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Smoothed<T: Interpolate> {
    current: T,
    target: T,
    factor: f32,
}

impl<T: Interpolate> Smoothed<T> {
    /// Start at `initial` with the target equal to it
    pub fn new(initial: T, factor: f32) -> Self {
        Self {
            target: initial.clone(),
            current: initial,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Overwrite the target; only the latest target matters
    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Advance one step and return the new value
    pub fn step(&mut self) -> &T {
        self.current = self.current.lerp(&self.target, self.factor);
        &self.current
    }

    /// Remaining distance to the target
    pub fn gap(&self) -> f32 {
        self.current.distance(&self.target)
    }
}
