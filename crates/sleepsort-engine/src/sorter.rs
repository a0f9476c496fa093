//! Sleep sorter - validates input, dispatches delay tasks, joins them and
//! reports the output sequence together with the wall-clock elapsed time.

use std::time::Duration;

use sleepsort_core::{plan, SortError, SortResult};

use crate::{cooperative, threaded, Backend, SorterConfig};

/// Result of a completed sort
#[derive(Clone, Debug, PartialEq)]
pub struct SortOutcome {
    /// Values in the order their delays expired
    pub values: Vec<i64>,
    /// Dispatch of the first task to the join of the last
    pub elapsed: Duration,
}

impl SortOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Whether the expiry order came out non-decreasing
    pub fn is_ascending(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// `(sequence, elapsed_seconds)`
    pub fn into_parts(self) -> (Vec<i64>, f64) {
        let secs = self.elapsed_secs();
        (self.values, secs)
    }
}

/// Sleep sorter
#[derive(Clone, Debug, Default)]
pub struct SleepSorter {
    config: SorterConfig,
}

impl SleepSorter {
    pub fn new(config: SorterConfig) -> Self {
        SleepSorter { config }
    }

    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    /// Sort on the caller's tokio runtime.
    ///
    /// The threaded backend runs on the blocking pool so the caller's
    /// workers are not parked for the longest delay.
    pub async fn sort_async(&self, values: &[i64]) -> SortResult<SortOutcome> {
        let tasks = plan(values)?;
        match self.config.backend {
            Backend::Cooperative => cooperative::run(tasks, &self.config).await,
            Backend::Threads => {
                let config = self.config.clone();
                tokio::task::spawn_blocking(move || threaded::run(tasks, &config))
                    .await
                    .map_err(SortError::scheduling)?
            }
        }
    }

    /// Sort from synchronous code.
    ///
    /// The cooperative backend builds its own single-threaded runtime; inside
    /// an async context it fails with `Scheduling`, use `sort_async` there.
    pub fn sort(&self, values: &[i64]) -> SortResult<SortOutcome> {
        let tasks = plan(values)?;
        match self.config.backend {
            Backend::Cooperative => {
                if tokio::runtime::Handle::try_current().is_ok() {
                    return Err(SortError::Scheduling(
                        "blocking sort called from within a tokio runtime; use sort_async".to_string(),
                    ));
                }
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .map_err(SortError::scheduling)?;
                runtime.block_on(cooperative::run(tasks, &self.config))
            }
            Backend::Threads => threaded::run(tasks, &self.config),
        }
    }
}

/// Sleep sort `values` on the current tokio runtime with the default config
pub async fn sleep_sort(values: &[i64]) -> SortResult<SortOutcome> {
    SleepSorter::default().sort_async(values).await
}

/// Sleep sort `values` from synchronous code with the default config
pub fn sort(values: &[i64]) -> SortResult<SortOutcome> {
    SleepSorter::default().sort(values)
}
