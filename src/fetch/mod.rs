//! Resource fetching for the preload cache
//!
//! A [`Fetcher`] performs the actual warm-up of one URL: it fetches the
//! resource, checks it is usable and throws the bytes away. The cache only
//! records that the fetch succeeded.

mod image_fetcher;

pub use image_fetcher::{FetchOptions, ImageFetcher};

use crate::error::FetchError;

/// Fetches and validates a single resource.
///
/// Implementations must be safe to call from several threads at once; the
/// batch worker runs one call per URL of a batch in parallel.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetch `url` and return the number of body bytes consumed.
    fn fetch(&self, url: &str) -> Result<usize, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> Result<usize, FetchError> + Send + Sync + 'static,
{
    fn fetch(&self, url: &str) -> Result<usize, FetchError> {
        self(url)
    }
}
