//! Output sink - the single shared sequence delay tasks append to
//!
//! Every append happens under one lock, so concurrent expiries never
//! interleave. The sink records expiry order, not wake-up order: a task that
//! wakes late is placed ahead of entries appended after its own deadline had
//! already passed if their deadlines are later. Appends after `close` are
//! dropped; a timed-out or failed sort closes the sink so stragglers cannot
//! write into a result nobody reads.

use parking_lot::{Condvar, Mutex};
use std::time::Instant;

use sleepsort_core::DelayTask;

use crate::TieBreak;

#[derive(Clone, Copy, Debug)]
struct Entry {
    index: usize,
    value: u64,
    deadline: Instant,
    appended_at: Instant,
}

#[derive(Debug, Default)]
struct SinkState {
    entries: Vec<Entry>,
    /// Tasks that ran to the end, appended or not
    finished: usize,
    closed: bool,
}

/// Shared output sequence
#[derive(Debug)]
pub struct OutputSink {
    state: Mutex<SinkState>,
    done: Condvar,
    total: usize,
    tie_break: TieBreak,
}

impl OutputSink {
    /// Create a sink expecting `total` appends
    pub fn with_capacity(total: usize, tie_break: TieBreak) -> Self {
        OutputSink {
            state: Mutex::new(SinkState {
                entries: Vec::with_capacity(total),
                ..SinkState::default()
            }),
            done: Condvar::new(),
            total,
            tie_break,
        }
    }

    /// Append a task whose `deadline` has expired. Returns false if the sink
    /// was already closed.
    pub fn append(&self, task: &DelayTask, deadline: Instant) -> bool {
        let mut state = self.state.lock();
        let now = Instant::now();
        self.insert(&mut state, task, deadline, now)
    }

    /// Only entries appended at or after `deadline` can have overtaken the
    /// task. Among those, later deadlines move behind it; equal deadlines move
    /// behind it under `TieBreak::InputOrder` when they came later in the input.
    fn insert(&self, state: &mut SinkState, task: &DelayTask, deadline: Instant, now: Instant) -> bool {
        if state.closed {
            return false;
        }

        let mut pos = state.entries.len();
        while pos > 0 {
            let prev = state.entries[pos - 1];
            if prev.appended_at < deadline {
                break;
            }
            let overtaken = prev.deadline > deadline
                || (prev.deadline == deadline
                    && self.tie_break == TieBreak::InputOrder
                    && prev.index > task.index);
            if !overtaken {
                break;
            }
            pos -= 1;
        }
        state.entries.insert(
            pos,
            Entry {
                index: task.index,
                value: task.value,
                deadline,
                appended_at: now,
            },
        );

        tracing::trace!(value = task.value, index = task.index, position = pos, "appended");
        true
    }

    /// Record that a task has ended; wakes waiters once all have
    pub fn finish(&self) {
        let mut state = self.state.lock();
        state.finished += 1;
        if state.finished >= self.total {
            self.done.notify_all();
        }
    }

    /// Block until every task has finished or `deadline` passes.
    /// Returns true if all tasks finished.
    pub fn wait_complete(&self, deadline: Option<Instant>) -> bool {
        let mut state = self.state.lock();
        while state.finished < self.total {
            match deadline {
                Some(deadline) => {
                    if self.done.wait_until(&mut state, deadline).timed_out() {
                        return state.finished >= self.total;
                    }
                }
                None => self.done.wait(&mut state),
            }
        }
        true
    }

    /// Stop accepting appends
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    /// Number of values appended so far
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of appends expected
    pub fn total(&self) -> usize {
        self.total
    }

    /// Move the accumulated sequence out, leaving the sink empty and closed
    pub fn take_values(&self) -> Vec<i64> {
        let mut state = self.state.lock();
        state.closed = true;
        std::mem::take(&mut state.entries)
            .into_iter()
            .map(|e| e.value as i64)
            .collect()
    }
}

/// Calls `OutputSink::finish` when dropped, including on unwind
pub(crate) struct FinishGuard<'a>(pub(crate) &'a OutputSink);

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}
