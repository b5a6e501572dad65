//! Cycle-accurate timing of code regions.
//!
//! A [`CycleCounter`] is the injected timing capability: it reads a
//! monotonic counter behind a serializing barrier, so work from outside a
//! measured region cannot be reordered into it (or out of it). The
//! [`CycleTimer`] brackets a region with one start read and one stop read.

pub mod hardware;
pub mod synthetic;

use std::fmt::Debug;

pub use hardware::HardwareCounter;
pub use synthetic::{ScriptedCounter, StepCounter};

/// A monotonic cycle counter with fenced reads.
pub trait CycleCounter: Debug {
    /// Returns the name of this counter (e.g., "rdtsc", "step").
    fn name(&self) -> &str;

    /// Opening read: barrier first, then read the counter.
    fn start_read(&mut self) -> u64;

    /// Closing read: counterpart barrier, then read the counter.
    fn stop_read(&mut self) -> u64;
}

/// An in-flight measurement started by [`CycleTimer::start`].
#[derive(Debug)]
pub struct CycleTimer<'c> {
    counter: &'c mut dyn CycleCounter,
    start: u64,
}

impl<'c> CycleTimer<'c> {
    /// Take the opening reading.
    pub fn start(counter: &'c mut dyn CycleCounter) -> Self {
        let start = counter.start_read();
        CycleTimer { counter, start }
    }

    /// Take the closing reading and return the elapsed cycles.
    pub fn stop(self) -> u64 {
        let end = self.counter.stop_read();
        // Counter wraparound is not modelled; wrapping_sub only keeps the
        // arithmetic total.
        end.wrapping_sub(self.start)
    }
}

/// Run `f` between a start and a stop reading of `counter`.
pub fn measure<T>(counter: &mut dyn CycleCounter, f: impl FnOnce() -> T) -> (T, u64) {
    let timer = CycleTimer::start(counter);
    let value = f();
    (value, timer.stop())
}
