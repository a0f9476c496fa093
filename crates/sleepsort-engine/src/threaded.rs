//! Threaded backend - one OS thread per element

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use sleepsort_core::{max_delay, DelayTask, SortError, SortResult};

use crate::sink::FinishGuard;
use crate::{OutputSink, SortOutcome, SorterConfig, Stopwatch};

/// Stack for delay threads; they only sleep and push one value
const DELAY_THREAD_STACK: usize = 64 * 1024;

pub(crate) fn run(tasks: Vec<DelayTask>, config: &SorterConfig) -> SortResult<SortOutcome> {
    let total = tasks.len();
    let sink = Arc::new(OutputSink::with_capacity(total, config.tie_break));

    tracing::debug!(tasks = total, max_delay = ?max_delay(&tasks), "spawning delay threads");

    let watch = Stopwatch::start();
    let start = watch.started_at();
    let scheduled = tasks
        .into_iter()
        .map(|task| task.deadline(start).map(|deadline| (task, deadline)))
        .collect::<SortResult<Vec<_>>>()?;

    let mut handles = Vec::with_capacity(total);
    for (task, deadline) in scheduled {
        let worker = Arc::clone(&sink);
        let spawned = thread::Builder::new()
            .name(format!("sleepsort-{}", task.index))
            .stack_size(DELAY_THREAD_STACK)
            .spawn(move || {
                let _done = FinishGuard(&worker);
                sleep_until(deadline);
                worker.append(&task, deadline);
            });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                // Threads already running cannot be cancelled; closing the
                // sink keeps them from writing anything
                sink.close();
                tracing::warn!(index = task.index, error = %e, "failed to spawn delay thread");
                return Err(SortError::scheduling(e));
            }
        }
    }

    if let Some(limit) = config.timeout {
        let deadline = start
            .checked_add(limit)
            .ok_or_else(|| SortError::Scheduling(format!("timeout {limit:?} is not representable")))?;
        if !sink.wait_complete(Some(deadline)) {
            sink.close();
            let completed = sink.len();
            tracing::warn!(?limit, completed, total, "sort timed out");
            return Err(SortError::Timeout {
                limit,
                completed,
                total,
            });
        }
    }

    for handle in handles {
        if handle.join().is_err() {
            sink.close();
            tracing::warn!("delay thread panicked");
            return Err(SortError::Scheduling("delay thread panicked".to_string()));
        }
    }

    let elapsed = watch.elapsed();
    tracing::debug!(?elapsed, "all delay threads joined");

    Ok(SortOutcome {
        values: sink.take_values(),
        elapsed,
    })
}

fn sleep_until(deadline: Instant) {
    let now = Instant::now();
    if deadline > now {
        thread::sleep(deadline - now);
    }
}
