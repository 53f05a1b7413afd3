//! Warm command handler

use anyhow::{anyhow, bail, Context, Result};
use humansize::{format_size, BINARY};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use imgwarm::{CacheStats, Fetcher, ImageFetcher, PreloadCache};

/// Arguments of `imgwarm warm`.
pub struct WarmArgs {
    pub urls: Vec<String>,
    pub file: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub timeout: u64,
}

/// Queue all URLs, wait for the worker to drain them and print a summary.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&Path>, args: WarmArgs) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(batch_size) = args.batch_size {
        config.cache.batch_size = batch_size;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.cache.batch_delay_ms = delay_ms;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid options: {}", e))?;

    let mut urls = args.urls;
    if let Some(path) = &args.file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list: {:?}", path))?;
        urls.extend(parse_url_list(&contents));
    }
    if urls.is_empty() {
        bail!("No URLs given. Pass URLs as arguments or use --file.");
    }

    let fetcher = ImageFetcher::new(config.fetch_options())?;
    let cache = PreloadCache::new(config.cache_settings(), fetcher);
    let report = warm(&cache, &urls, Duration::from_secs(args.timeout))?;

    println!("{}", report.summary());
    for url in &report.cold {
        println!("  not warmed: {}", url);
    }
    Ok(())
}

/// Outcome of a warm run.
#[derive(Debug)]
pub struct WarmReport {
    /// Distinct URLs requested
    pub requested: usize,
    /// Distinct URLs present in the cache afterwards
    pub warm: usize,
    /// Distinct URLs missing from the cache afterwards, in request order
    pub cold: Vec<String>,
    pub stats: CacheStats,
}

impl WarmReport {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Warmed {} of {} URLs ({} fetched",
            self.warm,
            self.requested,
            format_size(self.stats.bytes, BINARY)
        );
        if self.stats.failed > 0 {
            summary.push_str(&format!(", {} failed", self.stats.failed));
        }
        if self.stats.evicted > 0 {
            summary.push_str(&format!(", {} evicted", self.stats.evicted));
        }
        summary.push(')');
        summary
    }
}

/// Queue `urls` on `cache`, wait up to `timeout` for the queue to drain,
/// then check which URLs are warm.
pub fn warm<F: Fetcher>(
    cache: &PreloadCache<F>,
    urls: &[String],
    timeout: Duration,
) -> Result<WarmReport> {
    cache.preload_batch(urls.iter().cloned());
    if !cache.wait_idle(timeout) {
        bail!(
            "Timed out after {}s with {} URLs still queued",
            timeout.as_secs(),
            cache.pending_len()
        );
    }

    let mut seen = HashSet::new();
    let mut warm = 0;
    let mut cold = Vec::new();
    for url in urls {
        if !seen.insert(url.as_str()) {
            continue;
        }
        if cache.get(url).is_some() {
            warm += 1;
        } else {
            cold.push(url.clone());
        }
    }

    Ok(WarmReport {
        requested: seen.len(),
        warm,
        cold,
        stats: cache.stats(),
    })
}

/// Parse a URL list: one URL per line, blank lines and `#` comments skipped.
pub fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
