//! Background batch worker for queued preloads
//!
//! Drains the pending queue in FIFO batches of `batch_size`, preloading the
//! URLs of a batch in parallel and pausing `batch_delay` after each batch.
//!
//! At most one worker runs per cache. The enqueuing caller sets `draining`
//! under the queue lock before spawning; the worker clears it under the same
//! lock when it finds the queue empty.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use super::{lock, Counters, Shared};
use crate::fetch::Fetcher;

/// Start a drain loop on its own thread.
///
/// Falls back to draining on the calling thread if the OS refuses to spawn.
pub(super) fn spawn<F: Fetcher>(shared: Arc<Shared<F>>) {
    let worker_shared = Arc::clone(&shared);
    let spawned = thread::Builder::new()
        .name("imgwarm-drain".to_string())
        .spawn(move || drain(&worker_shared));

    if let Err(e) = spawned {
        warn!(error = %e, "failed to spawn preload worker, draining on caller thread");
        drain(&shared);
    }
}

/// Clears the draining flag if the worker itself unwinds, so the next
/// `preload_batch` can start a fresh worker.
struct ResetOnPanic<'a, F>(&'a Shared<F>);

impl<F> Drop for ResetOnPanic<'_, F> {
    fn drop(&mut self) {
        if thread::panicking() {
            lock(&self.0.queue).draining = false;
            self.0.idle.notify_all();
        }
    }
}

fn drain<F: Fetcher>(shared: &Shared<F>) {
    let _guard = ResetOnPanic(shared);
    info!(
        pending = lock(&shared.queue).pending.len(),
        batch_size = shared.settings.batch_size,
        "preload worker started"
    );

    let mut batches = 0u64;
    while let Some(batch) = take_batch(shared) {
        debug!(size = batch.len(), "draining batch");
        run_batch(shared, &batch);
        Counters::bump(&shared.counters.batches, 1);
        batches += 1;

        if !shared.settings.batch_delay.is_zero() {
            thread::sleep(shared.settings.batch_delay);
        }
    }

    info!(batches, "preload worker idle");
}

/// Take the next batch from the front of the queue.
///
/// Returns `None` and marks the worker inactive once the queue is empty.
fn take_batch<F>(shared: &Shared<F>) -> Option<Vec<String>> {
    let mut queue = lock(&shared.queue);
    if queue.pending.is_empty() {
        queue.draining = false;
        shared.idle.notify_all();
        return None;
    }

    let take = shared.settings.batch_size.min(queue.pending.len());
    Some(queue.pending.drain(..take).collect())
}

/// Build the cache's dedicated pool so a batch runs fully in parallel.
///
/// Built once per cache and reused by every drain run. Returns `None` for
/// single-URL batches or if the pool cannot be built, in which case batches
/// run sequentially.
pub(super) fn build_pool(threads: usize) -> Option<ThreadPool> {
    if threads <= 1 {
        return None;
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("imgwarm-preload-{}", i))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!(error = %e, "failed to build preload pool, preloading sequentially");
            None
        }
    }
}

/// Preload every URL of a batch and wait for all of them to settle.
fn run_batch<F: Fetcher>(shared: &Shared<F>, batch: &[String]) {
    match shared.pool.as_ref() {
        Some(pool) if batch.len() > 1 => {
            pool.install(|| batch.par_iter().for_each(|url| settle(shared, url)));
        }
        _ => batch.iter().for_each(|url| settle(shared, url)),
    }
}

/// Preload one URL, swallowing failure.
///
/// A panicking fetcher counts as a failed fetch so the rest of the queue
/// still drains.
fn settle<F: Fetcher>(shared: &Shared<F>, url: &str) {
    match panic::catch_unwind(AssertUnwindSafe(|| shared.preload(url))) {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => debug!(error = %e, "queued preload failed"),
        Err(payload) => {
            Counters::bump(&shared.counters.failed, 1);
            warn!(url, panic = %panic_message(payload.as_ref()), "fetcher panicked");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
