//! Clock source
//!
//! The host drives the engine once per repaint. [`FrameClock`] turns those
//! callbacks into [`Frame`]s stamped by a monotonic [`Clock`]. Timestamps are
//! milliseconds, like a page's high-resolution timer.

use std::cell::Cell;
use std::ops::Sub;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds since the clock's origin
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct FrameTime(pub f64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0.0);

    pub fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }
}

impl Sub for FrameTime {
    type Output = f64;

    /// Elapsed milliseconds between two timestamps
    fn sub(self, rhs: FrameTime) -> f64 {
        self.0 - rhs.0
    }
}

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> FrameTime;
}

/// Wall clock backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> FrameTime {
        FrameTime(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Manually advanced clock for tests and headless simulation
///
/// Clones share the same time, so one copy can be handed to the engine and
/// another kept by the driver.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `ms` milliseconds
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }

    /// Jump to an absolute time; earlier times are ignored
    pub fn set(&self, ms: f64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> FrameTime {
        FrameTime(self.now.get())
    }
}

/// One repaint tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Sequential frame number, starting at 0
    pub index: u64,
    /// Timestamp of this frame
    pub time: FrameTime,
    /// Milliseconds since the previous frame (0 for the first)
    pub delta_ms: f64,
}

/// Turns repaint callbacks into numbered frames
#[derive(Clone, Debug)]
pub struct FrameClock<C: Clock> {
    clock: C,
    last: Option<FrameTime>,
    next_index: u64,
}

impl<C: Clock> FrameClock<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: None,
            next_index: 0,
        }
    }

    /// Current time without producing a frame
    pub fn now(&self) -> FrameTime {
        self.clock.now()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.next_index
    }

    /// Produce the next frame
    pub fn next_frame(&mut self) -> Frame {
        let time = self.clock.now();
        let delta_ms = self.last.map(|last| (time - last).max(0.0)).unwrap_or(0.0);
        let frame = Frame {
            index: self.next_index,
            time,
            delta_ms,
        };
        self.last = Some(time);
        self.next_index += 1;
        tracing::trace!("frame {} at {:.2}ms (+{:.2}ms)", frame.index, time.0, delta_ms);
        frame
    }
}
