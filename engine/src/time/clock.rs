//! Clocks
//!
//! [`SystemClock`] follows real time; [`ManualClock`] advances by a fixed
//! step per sample for headless runs and tests.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// One clock sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds elapsed since the previous sample
    pub delta: f32,
    /// Absolute wall-clock time in seconds
    pub wall_clock: f64,
}

impl FrameTime {
    pub fn new(delta: f32, wall_clock: f64) -> Self {
        Self { delta, wall_clock }
    }
}

/// Supplies per-frame elapsed time.
pub trait Clock {
    /// Take a sample. The first sample after construction has a zero delta.
    fn sample(&mut self) -> FrameTime;
}

/// Real-time clock.
///
/// Delta comes from a monotonic [`Instant`]; the wall-clock reading is the
/// Unix epoch time in seconds. Delta is not capped: a long stall produces a
/// single large step, matching a browser frame clock.
#[derive(Debug, Clone)]
pub struct SystemClock {
    last_sample: Option<Instant>,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self { last_sample: None }
    }

    fn wall_clock_seconds() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl Clock for SystemClock {
    fn sample(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = self
            .last_sample
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_sample = Some(now);
        FrameTime::new(delta, Self::wall_clock_seconds())
    }
}

/// Deterministic clock advancing by `step` seconds per sample.
#[derive(Debug, Clone)]
pub struct ManualClock {
    step: f32,
    wall_clock: f64,
}

impl ManualClock {
    /// Create a clock starting at `start` wall-clock seconds.
    pub fn new(step: f32, start: f64) -> Self {
        Self {
            step,
            wall_clock: start,
        }
    }

    /// Fixed step per sample.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Change the step used by later samples.
    pub fn set_step(&mut self, step: f32) {
        self.step = step;
    }

    /// Current wall-clock reading, without sampling.
    pub fn now(&self) -> f64 {
        self.wall_clock
    }

    /// Jump the wall clock forward without producing a frame.
    pub fn skip(&mut self, seconds: f64) {
        self.wall_clock += seconds;
    }
}

impl Clock for ManualClock {
    fn sample(&mut self) -> FrameTime {
        self.wall_clock += f64::from(self.step);
        FrameTime::new(self.step, self.wall_clock)
    }
}
