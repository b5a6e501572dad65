//! Deterministic counters for tests and simulation.

use std::collections::VecDeque;

use super::CycleCounter;

/// Advances by a fixed step on every read, so each measured region reports
/// exactly `step` cycles.
#[derive(Debug, Clone)]
pub struct StepCounter {
    now: u64,
    step: u64,
}

impl StepCounter {
    pub fn new(step: u64) -> Self {
        StepCounter { now: 0, step }
    }

    fn tick(&mut self) -> u64 {
        self.now += self.step;
        self.now
    }
}

impl CycleCounter for StepCounter {
    fn name(&self) -> &str {
        "step"
    }

    fn start_read(&mut self) -> u64 {
        self.tick()
    }

    fn stop_read(&mut self) -> u64 {
        self.tick()
    }
}

/// Replays a fixed sequence of readings, then keeps returning the last one.
#[derive(Debug, Clone)]
pub struct ScriptedCounter {
    readings: VecDeque<u64>,
    last: u64,
}

impl ScriptedCounter {
    /// Replay `readings` in order. They should be non-decreasing.
    pub fn new(readings: Vec<u64>) -> Self {
        ScriptedCounter {
            readings: readings.into(),
            last: 0,
        }
    }

    /// Readings such that consecutive start/stop pairs measure `durations`.
    pub fn from_durations(durations: &[u64]) -> Self {
        let mut readings = Vec::with_capacity(durations.len() * 2);
        let mut t = 0u64;
        for &d in durations {
            readings.push(t);
            t += d;
            readings.push(t);
        }
        Self::new(readings)
    }

    /// Readings not yet consumed.
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }

    fn next_reading(&mut self) -> u64 {
        if let Some(r) = self.readings.pop_front() {
            self.last = r;
        }
        self.last
    }
}

impl CycleCounter for ScriptedCounter {
    fn name(&self) -> &str {
        "scripted"
    }

    fn start_read(&mut self) -> u64 {
        self.next_reading()
    }

    fn stop_read(&mut self) -> u64 {
        self.next_reading()
    }
}
