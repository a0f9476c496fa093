//! Delay tasks - one per input element
//!
//! A task is planned from a validated value and lives through two states:
//! pending (suspended until its deadline) and appended.

use std::time::{Duration, Instant};

use crate::{delay_for, SortError, SortResult};

/// A single element scheduled for delayed append
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayTask {
    /// Position in the input sequence
    pub index: usize,
    /// Validated non-negative value
    pub value: u64,
    /// Suspension before the append
    pub delay: Duration,
}

impl DelayTask {
    pub fn new(index: usize, value: u64) -> Self {
        DelayTask {
            index,
            value,
            delay: delay_for(value),
        }
    }

    /// Absolute expiry measured from a shared start instant.
    /// Equal values get equal deadlines.
    pub fn deadline(&self, start: Instant) -> SortResult<Instant> {
        start.checked_add(self.delay).ok_or_else(|| {
            SortError::Scheduling(format!(
                "deadline for value {} at index {} is not representable",
                self.value, self.index
            ))
        })
    }

    /// Value as it appears in the output sequence
    #[inline]
    pub fn output_value(&self) -> i64 {
        // value came from a non-negative i64
        self.value as i64
    }
}

/// Validate the input and create one task per element, in input order.
///
/// Fails on the first negative value; no task is created in that case.
pub fn plan(values: &[i64]) -> SortResult<Vec<DelayTask>> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            u64::try_from(value)
                .map(|v| DelayTask::new(index, v))
                .map_err(|_| SortError::InvalidInput { index, value })
        })
        .collect()
}

/// Longest delay in a plan; the sort cannot finish sooner than this
pub fn max_delay(tasks: &[DelayTask]) -> Duration {
    tasks.iter().map(|t| t.delay).max().unwrap_or(Duration::ZERO)
}
