//! Bounded image preload cache
//!
//! `PreloadCache` warms resources ahead of display and remembers which URLs
//! have been warmed. Single URLs are preloaded on the calling thread with
//! [`PreloadCache::preload`]; bulk requests go through
//! [`PreloadCache::preload_batch`], which queues URLs for one background
//! worker that drains them in small, throttled batches.
//!
//! The bookkeeping is bounded: once more than `max_entries` URLs have been
//! warmed, the oldest-inserted URL is forgotten.

pub mod store;
mod worker;

pub use store::{CacheMarker, FifoStore, Inserted};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rayon::ThreadPool;
use tracing::{debug, trace};

use crate::error::PreloadError;
use crate::fetch::Fetcher;

/// Default maximum number of remembered URLs
pub const DEFAULT_MAX_ENTRIES: usize = 100;
/// Default number of URLs preloaded concurrently per batch
pub const DEFAULT_BATCH_SIZE: usize = 3;
/// Default pause between batches
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Construction parameters for a [`PreloadCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum number of remembered URLs before FIFO eviction
    pub max_entries: usize,
    /// URLs taken from the queue and preloaded together
    pub batch_size: usize,
    /// Pause after each batch
    pub batch_delay: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

/// Successful outcome of [`PreloadCache::preload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preloaded {
    /// URL was already cached; nothing was fetched.
    AlreadyCached,
    /// URL was fetched and added to the cache.
    Fetched { bytes: usize },
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Preloads answered from the cache without fetching
    pub hits: u64,
    /// Successful fetches
    pub fetched: u64,
    /// Failed fetches
    pub failed: u64,
    /// Entries dropped by the size bound
    pub evicted: u64,
    /// Batches drained by the worker
    pub batches: u64,
    /// Body bytes consumed by successful fetches
    pub bytes: u64,
}

impl CacheStats {
    /// Number of fetch attempts (successful or not)
    pub fn attempts(&self) -> u64 {
        self.fetched + self.failed
    }
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    fetched: AtomicU64,
    failed: AtomicU64,
    evicted: AtomicU64,
    batches: AtomicU64,
    bytes: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
        }
    }
}

/// Pending work and the single-worker flag, guarded together.
#[derive(Default)]
struct QueueState {
    pending: VecDeque<String>,
    draining: bool,
}

/// State shared between cache handles and the batch worker.
struct Shared<F> {
    fetcher: F,
    settings: CacheSettings,
    store: Mutex<FifoStore<String>>,
    queue: Mutex<QueueState>,
    /// Signalled when the worker goes idle
    idle: Condvar,
    counters: Counters,
    /// Runs the URLs of a batch in parallel; `None` runs them in order
    pool: Option<ThreadPool>,
}

/// Lock a mutex, recovering the data if another thread panicked while holding it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<F: Fetcher> Shared<F> {
    fn preload(&self, url: &str) -> Result<Preloaded, PreloadError> {
        if lock(&self.store).contains(url) {
            trace!(url, "already cached");
            Counters::bump(&self.counters.hits, 1);
            return Ok(Preloaded::AlreadyCached);
        }

        let bytes = match self.fetcher.fetch(url) {
            Ok(bytes) => bytes,
            Err(source) => {
                Counters::bump(&self.counters.failed, 1);
                return Err(PreloadError::PreloadFailed {
                    url: url.to_string(),
                    source,
                });
            }
        };

        Counters::bump(&self.counters.fetched, 1);
        Counters::bump(&self.counters.bytes, bytes as u64);

        let inserted = lock(&self.store).insert(url.to_string());
        if let Inserted::Evicted(oldest) = inserted {
            Counters::bump(&self.counters.evicted, 1);
            debug!(url = %oldest, "evicted");
        }
        debug!(url, bytes, "preloaded");

        Ok(Preloaded::Fetched { bytes })
    }
}

/// Bounded preload cache with a single background batch worker.
///
/// Cloning yields another handle to the same cache.
pub struct PreloadCache<F> {
    shared: Arc<Shared<F>>,
}

impl<F> Clone for PreloadCache<F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<F: Fetcher> PreloadCache<F> {
    /// Create a cache that warms URLs with `fetcher`.
    ///
    /// `batch_size` of zero is treated as one.
    pub fn new(settings: CacheSettings, fetcher: F) -> Self {
        let settings = CacheSettings {
            batch_size: settings.batch_size.max(1),
            ..settings
        };

        Self {
            shared: Arc::new(Shared {
                fetcher,
                store: Mutex::new(FifoStore::new(settings.max_entries)),
                pool: worker::build_pool(settings.batch_size),
                settings,
                queue: Mutex::new(QueueState::default()),
                idle: Condvar::new(),
                counters: Counters::default(),
            }),
        }
    }

    /// Preload a single URL on the calling thread.
    ///
    /// Returns immediately if the URL is already cached. Otherwise the URL is
    /// fetched; on success it is cached (evicting the oldest entry if the
    /// cache is full). On failure nothing is cached, so a later call retries.
    pub fn preload(&self, url: &str) -> Result<Preloaded, PreloadError> {
        self.shared.preload(url)
    }

    /// Queue URLs for background preloading and return immediately.
    ///
    /// Starts the batch worker if it is not already running. Duplicates are
    /// not filtered; a URL cached by the time its turn comes is skipped
    /// without fetching. Failures are logged and otherwise ignored.
    pub fn preload_batch<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        if urls.is_empty() {
            return;
        }

        let start = {
            let mut queue = lock(&self.shared.queue);
            trace!(added = urls.len(), pending = queue.pending.len(), "enqueued");
            queue.pending.extend(urls);

            let start = !queue.draining;
            queue.draining = true;
            start
        };

        if start {
            worker::spawn(Arc::clone(&self.shared));
        }
    }

    /// Queue the item at `focus` and its neighbours within `radius`,
    /// nearest first.
    ///
    /// Returns the number of URLs queued (zero if `focus` is out of range).
    pub fn warm_window<S: AsRef<str>>(&self, urls: &[S], focus: usize, radius: usize) -> usize {
        let order = window_order(urls.len(), focus, radius);
        let count = order.len();
        self.preload_batch(order.into_iter().map(|i| urls[i].as_ref().to_string()));
        count
    }

    /// Look up the presence marker for a URL.
    pub fn get(&self, url: &str) -> Option<CacheMarker> {
        lock(&self.shared.store).get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        lock(&self.shared.store).contains(url)
    }

    pub fn len(&self) -> usize {
        lock(&self.shared.store).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.shared.store).is_empty()
    }

    /// Maximum number of remembered URLs.
    pub fn capacity(&self) -> usize {
        lock(&self.shared.store).capacity()
    }

    /// Cached URLs from oldest to newest.
    pub fn urls(&self) -> Vec<String> {
        lock(&self.shared.store).keys().cloned().collect()
    }

    /// Number of URLs queued but not yet taken by the worker.
    pub fn pending_len(&self) -> usize {
        lock(&self.shared.queue).pending.len()
    }

    /// Whether the batch worker is running.
    pub fn is_draining(&self) -> bool {
        lock(&self.shared.queue).draining
    }

    /// Block until the queue is drained and the worker has stopped.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let queue = lock(&self.shared.queue);
        let (queue, result) = self
            .shared
            .idle
            .wait_timeout_while(queue, timeout, |q| q.draining || !q.pending.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        drop(queue);
        !result.timed_out()
    }

    pub fn stats(&self) -> CacheStats {
        self.shared.counters.snapshot()
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.shared.settings
    }
}

/// Indices of the window around `focus`: focus first, then alternating
/// after/before with growing distance.
pub fn window_order(len: usize, focus: usize, radius: usize) -> Vec<usize> {
    if focus >= len {
        return Vec::new();
    }

    let mut order = vec![focus];
    for distance in 1..=radius {
        let mut added = false;
        if let Some(after) = focus.checked_add(distance).filter(|&i| i < len) {
            order.push(after);
            added = true;
        }
        if let Some(before) = focus.checked_sub(distance) {
            order.push(before);
            added = true;
        }
        if !added {
            break;
        }
    }
    order
}
