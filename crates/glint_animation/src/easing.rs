//! Easing functions
//!
//! Every curve maps a progress ratio in `[0, 1]` to an eased ratio in
//! `[0, 1]`, with `f(0) = 0` and `f(1) = 1`. Inputs outside the range are
//! clamped first.

use serde::{Deserialize, Serialize};

/// Decelerating quartic curve: `1 - (1 - p)^4`
pub fn ease_out_quart(progress: f64) -> f64 {
    let inv = 1.0 - progress.clamp(0.0, 1.0);
    1.0 - inv * inv * inv * inv
}

/// Named easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic acceleration
    EaseIn,
    /// Quadratic deceleration
    EaseOut,
    /// Quadratic acceleration then deceleration
    EaseInOut,
    EaseOutCubic,
    #[default]
    EaseOutQuart,
}

impl Easing {
    /// Evaluate the curve at `t`
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseOutQuart => ease_out_quart(t),
        }
    }
}
