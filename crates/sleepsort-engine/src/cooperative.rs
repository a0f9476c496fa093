//! Cooperative backend - a single-threaded run loop over pending expirations
//!
//! Every element is a pending timer keyed by (deadline, index). The loop
//! suspends until the earliest deadline, then fires every timer that has
//! expired by the time it wakes, earliest deadline first. Timers sharing one
//! wake-up therefore still append in deadline order even though the tokio
//! timer only resolves to the millisecond.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use tokio::time::{sleep_until, timeout};

use sleepsort_core::{max_delay, DelayTask, SortError, SortResult};

use crate::{OutputSink, SortOutcome, SorterConfig, Stopwatch};

type Pending = BinaryHeap<Reverse<(Instant, usize)>>;

pub(crate) async fn run(tasks: Vec<DelayTask>, config: &SorterConfig) -> SortResult<SortOutcome> {
    let total = tasks.len();
    let sink = OutputSink::with_capacity(total, config.tie_break);

    tracing::debug!(tasks = total, max_delay = ?max_delay(&tasks), "dispatching delay tasks");

    let watch = Stopwatch::start();
    let mut pending = Pending::with_capacity(total);
    for task in &tasks {
        pending.push(Reverse((task.deadline(watch.started_at())?, task.index)));
    }

    if let Some(limit) = config.timeout {
        if timeout(limit, fire_all(&mut pending, &tasks, &sink)).await.is_err() {
            sink.close();
            let completed = sink.len();
            tracing::warn!(?limit, completed, total, "sort timed out");
            return Err(SortError::Timeout {
                limit,
                completed,
                total,
            });
        }
    } else {
        fire_all(&mut pending, &tasks, &sink).await;
    }

    let elapsed = watch.elapsed();
    tracing::debug!(?elapsed, "all delay tasks fired");

    Ok(SortOutcome {
        values: sink.take_values(),
        elapsed,
    })
}

/// Run the loop until no timer is pending.
/// `tasks[i].index == i`: the plan is in input order.
async fn fire_all(pending: &mut Pending, tasks: &[DelayTask], sink: &OutputSink) {
    while let Some(&Reverse((next, _))) = pending.peek() {
        sleep_until(next.into()).await;

        let now = Instant::now();
        while let Some(&Reverse((deadline, index))) = pending.peek() {
            if deadline > now {
                break;
            }
            pending.pop();
            sink.append(&tasks[index], deadline);
        }
    }
}
