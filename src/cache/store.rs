//! Bounded insertion-order store
//!
//! Remembers which keys have been preloaded. When the entry count exceeds
//! the configured maximum, the oldest-inserted key is evicted. Reads never
//! change eviction order.

use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Presence marker returned for cached keys.
///
/// Carries the insertion sequence number: markers from later insertions
/// compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheMarker {
    seq: u64,
}

impl CacheMarker {
    /// Monotonic insertion sequence number (starts at 0 for a new store).
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Outcome of [`FifoStore::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted<K> {
    /// Key was already present; nothing changed.
    Existing,
    /// Key was added and the store stayed within bounds.
    Added,
    /// Key was added and the given oldest key was evicted.
    Evicted(K),
}

/// FIFO-bounded key -> marker map.
#[derive(Debug)]
pub struct FifoStore<K> {
    /// Cached entries (key -> marker)
    entries: HashMap<K, CacheMarker>,
    /// Insertion order (front = oldest, back = newest)
    order: VecDeque<K>,
    /// Maximum number of entries
    max_size: usize,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl<K> FifoStore<K>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty store holding at most `max_size` entries.
    ///
    /// A `max_size` of zero is treated as one.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_size: max_size.max(1),
            next_seq: 0,
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<CacheMarker>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).copied()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Insert a key, then evict the oldest entry if over capacity.
    pub fn insert(&mut self, key: K) -> Inserted<K> {
        if self.entries.contains_key(&key) {
            return Inserted::Existing;
        }

        let marker = CacheMarker { seq: self.next_seq };
        self.next_seq += 1;
        self.entries.insert(key.clone(), marker);
        self.order.push_back(key);

        if self.entries.len() > self.max_size {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                return Inserted::Evicted(oldest);
            }
        }

        Inserted::Added
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }
}
