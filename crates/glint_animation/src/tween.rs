//! Fixed-duration tweens
//!
//! A [`Tween`] holds no value of its own: sampling it at a timestamp yields
//! the linear progress and the eased progress, and the caller maps those onto
//! whatever it animates.

use crate::clock::FrameTime;
use crate::easing::Easing;

/// Progress of a tween at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample {
    /// Linear progress in `[0, 1]`
    pub progress: f64,
    /// Eased progress in `[0, 1]`
    pub eased: f64,
}

impl TweenSample {
    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }
}

/// A one-shot animation of fixed duration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    start: FrameTime,
    duration_ms: f64,
    easing: Easing,
}

impl Tween {
    pub fn new(start: FrameTime, duration_ms: f64, easing: Easing) -> Self {
        Self {
            start,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    pub fn start(&self) -> FrameTime {
        self.start
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Sample at `now`
    ///
    /// `progress = min((now - start) / duration, 1)`; times before the start
    /// sample as 0 and a zero duration is immediately finished.
    pub fn sample(&self, now: FrameTime) -> TweenSample {
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now - self.start) / self.duration_ms).clamp(0.0, 1.0)
        };
        TweenSample {
            progress,
            eased: self.easing.apply(progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_progress() {
        let tween = Tween::new(FrameTime(1000.0), 2000.0, Easing::Linear);

        assert_eq!(tween.sample(FrameTime(1000.0)).progress, 0.0);
        assert_eq!(tween.sample(FrameTime(2000.0)).progress, 0.5);
        let done = tween.sample(FrameTime(5000.0));
        assert_eq!(done.progress, 1.0);
        assert!(done.is_finished());
    }

    #[test]
    fn test_tween_before_start_is_zero() {
        let tween = Tween::new(FrameTime(500.0), 100.0, Easing::EaseOutQuart);
        let sample = tween.sample(FrameTime(0.0));
        assert_eq!(sample.progress, 0.0);
        assert_eq!(sample.eased, 0.0);
    }

    #[test]
    fn test_tween_applies_easing() {
        let tween = Tween::new(FrameTime::ZERO, 2000.0, Easing::EaseOutQuart);
        let sample = tween.sample(FrameTime(1000.0));
        assert_eq!(sample.progress, 0.5);
        assert_eq!(sample.eased, 0.9375);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = Tween::new(FrameTime(10.0), 0.0, Easing::EaseOutQuart);
        assert!(tween.sample(FrameTime(10.0)).is_finished());
    }
}
