//! Benchmark clock for the sorter

use std::time::{Duration, Instant};

/// Wall-clock stopwatch over the monotonic OS clock.
/// INVARIANT: includes time spent suspended; this is not CPU time
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    /// Instant the measurement started
    started: Instant,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start() -> Self {
        Stopwatch {
            started: Instant::now(),
        }
    }

    /// Instant the measurement started; shared start for task deadlines
    pub fn started_at(&self) -> Instant {
        self.started
    }

    /// Time since start
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
