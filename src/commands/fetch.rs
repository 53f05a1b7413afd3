//! Fetch command handler

use anyhow::Result;
use humansize::{format_size, BINARY};
use std::path::Path;

use imgwarm::{ImageFetcher, PreloadCache, Preloaded};

/// Preload a single URL and print what happened.
///
/// A failed preload is returned as an error so the process exits non-zero.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&Path>, url: &str) -> Result<()> {
    let config = super::load_config(config_path)?;
    let fetcher = ImageFetcher::new(config.fetch_options())?;
    let cache = PreloadCache::new(config.cache_settings(), fetcher);

    println!("{}", describe(url, cache.preload(url)?));
    Ok(())
}

fn describe(url: &str, outcome: Preloaded) -> String {
    match outcome {
        Preloaded::Fetched { bytes } => {
            format!("Preloaded {} ({})", url, format_size(bytes, BINARY))
        }
        Preloaded::AlreadyCached => format!("{} is already cached", url),
    }
}
