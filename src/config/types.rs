//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, DEFAULT_MAX_ENTRIES};

/// Upper bound for `cache.batch_size`
pub const MAX_BATCH_SIZE: usize = 64;
/// Upper bound for `fetch.timeout_secs`
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Preload cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of remembered URLs
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// URLs preloaded together by the background worker
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

pub fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

pub fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

pub fn default_batch_delay_ms() -> u64 {
    DEFAULT_BATCH_DELAY.as_millis() as u64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("cache.max_entries must be > 0".to_string());
        }
        if self.batch_size == 0 {
            return Err("cache.batch_size must be > 0".to_string());
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "cache.batch_size {} exceeds maximum ({})",
                self.batch_size, MAX_BATCH_SIZE
            ));
        }
        Ok(())
    }
}

/// Resource fetching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Decode fetched bodies as images
    #[serde(default = "default_decode")]
    pub decode: bool,
}

pub fn default_timeout_secs() -> u64 {
    10
}

pub fn default_user_agent() -> String {
    concat!("imgwarm/", env!("CARGO_PKG_VERSION")).to_string()
}

pub fn default_decode() -> bool {
    true
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            decode: default_decode(),
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("fetch.timeout_secs must be > 0".to_string());
        }
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(format!(
                "fetch.timeout_secs {} exceeds maximum ({}s)",
                self.timeout_secs, MAX_TIMEOUT_SECS
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err("fetch.user_agent must not be empty".to_string());
        }
        Ok(())
    }
}
