//! Glint Animation Primitives
//!
//! Time-driven building blocks used by the effect controllers.
//!
//! # Features
//!
//! - **Easing**: pure progress → eased-progress curves (`ease_out_quart`, ...)
//! - **Clock Source**: monotonic [`Clock`]s and a [`FrameClock`] that turns
//!   repaint callbacks into numbered [`Frame`]s
//! - **Tweens**: fixed-duration progress sampled against the clock
//! - **Smoothing**: per-frame exponential approach toward a moving target

pub mod clock;
pub mod easing;
pub mod tween;
pub mod values;

pub use clock::{Clock, Frame, FrameClock, FrameTime, ManualClock, SystemClock};
pub use easing::{ease_out_quart, Easing};
pub use tween::{Tween, TweenSample};
pub use values::{Interpolate, Smoothed};
