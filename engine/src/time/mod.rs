//! Time Module
//!
//! Frame timing for the simulation. A [`Clock`] is sampled exactly once per
//! tick and yields a [`FrameTime`]: the elapsed delta since the previous
//! sample plus an absolute wall-clock reading. The wall clock drives the
//! fire-rate gate, the boss sway, and delayed effects, so it must keep
//! advancing independently of how often ticks run.

pub mod clock;

pub use clock::{Clock, FrameTime, ManualClock, SystemClock};
