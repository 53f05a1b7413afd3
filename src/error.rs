//! Preload and fetch errors.

/// Errors a [`Fetcher`](crate::fetch::Fetcher) can report for a single URL.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with status {status}")]
    Status { status: u16 },

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a local file URL: {url}")]
    InvalidFileUrl { url: String },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Resource is empty")]
    Empty,
}

/// Errors returned by [`PreloadCache::preload`](crate::cache::PreloadCache::preload).
#[derive(Debug, thiserror::Error)]
pub enum PreloadError {
    /// Fetching or decoding the resource failed. The URL was not cached.
    #[error("Failed to preload {url}: {source}")]
    PreloadFailed {
        url: String,
        #[source]
        source: FetchError,
    },
}

impl PreloadError {
    /// The URL that failed to preload.
    pub fn url(&self) -> &str {
        match self {
            PreloadError::PreloadFailed { url, .. } => url,
        }
    }
}
