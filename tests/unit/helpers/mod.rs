//! Test helper utilities

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use imgwarm::{CacheSettings, FetchError, Fetcher};

/// Generous upper bound for waiting on the batch worker
pub const WAIT: Duration = Duration::from_secs(5);

/// Cache settings with no inter-batch pause
pub fn fast_settings(max_entries: usize, batch_size: usize) -> CacheSettings {
    CacheSettings {
        max_entries,
        batch_size,
        batch_delay: Duration::ZERO,
    }
}

/// Fetcher that records every call and fails for a configured set of URLs.
#[derive(Clone, Default)]
pub struct RecordingFetcher {
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<HashSet<String>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher that fails for each of `urls`
    pub fn failing(urls: &[&str]) -> Self {
        Self {
            calls: Arc::default(),
            failing: Arc::new(urls.iter().map(|u| u.to_string()).collect()),
        }
    }

    /// URLs fetched so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of fetches of `url`
    pub fn count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

impl Fetcher for RecordingFetcher {
    fn fetch(&self, url: &str) -> Result<usize, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            Err(FetchError::Status { status: 404 })
        } else {
            Ok(100)
        }
    }
}
