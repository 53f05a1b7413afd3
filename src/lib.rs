//! imgwarm library
//!
//! A bounded image preload cache: warms images ahead of display through a
//! pluggable [`Fetcher`], remembers which URLs are warm with FIFO eviction,
//! and drains bulk requests through a single batched, throttled worker.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;

pub use cache::{CacheMarker, CacheSettings, CacheStats, PreloadCache, Preloaded};
pub use config::Config;
pub use error::{FetchError, PreloadError};
pub use fetch::{FetchOptions, Fetcher, ImageFetcher};
