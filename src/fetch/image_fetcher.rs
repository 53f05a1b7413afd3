//! Default fetcher: HTTP(S) or local file, then image decode.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::trace;

use super::Fetcher;
use crate::config;
use crate::error::FetchError;

/// Options for [`ImageFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout for HTTP fetches
    pub timeout: Duration,
    /// User-Agent header sent with HTTP fetches
    pub user_agent: String,
    /// Decode the body as an image (otherwise only require a non-empty body)
    pub decode: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(config::default_timeout_secs()),
            user_agent: config::default_user_agent(),
            decode: config::default_decode(),
        }
    }
}

/// Fetches `http://`/`https://` URLs over a blocking HTTP client and reads
/// `file://` URLs or bare paths from disk. The body is decoded as an image
/// and discarded.
pub struct ImageFetcher {
    http: Client,
    decode: bool,
}

impl ImageFetcher {
    /// Build a fetcher with its own HTTP client.
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            http,
            decode: options.decode,
        })
    }

    /// Whether fetched bodies are decoded as images.
    pub fn decodes(&self) -> bool {
        self.decode
    }

    fn read(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if is_http(url) {
            let response = self.http.get(url).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                });
            }
            Ok(response.bytes()?.to_vec())
        } else {
            Ok(fs::read(local_path(url)?)?)
        }
    }
}

impl Fetcher for ImageFetcher {
    fn fetch(&self, url: &str) -> Result<usize, FetchError> {
        let bytes = self.read(url)?;
        if bytes.is_empty() {
            return Err(FetchError::Empty);
        }

        if self.decode {
            let decoded = image::load_from_memory(&bytes)?;
            trace!(
                url,
                width = decoded.width(),
                height = decoded.height(),
                "decoded"
            );
        }

        Ok(bytes.len())
    }
}

/// Check whether a locator should go over HTTP
fn is_http(url: &str) -> bool {
    has_scheme(url, "http://") || has_scheme(url, "https://")
}

fn has_scheme(url: &str, scheme: &str) -> bool {
    url.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

/// Resolve a `file://` URL (percent-encoded, optionally `localhost`) or a
/// bare path to a filesystem path.
fn local_path(url: &str) -> Result<PathBuf, FetchError> {
    if !has_scheme(url, "file://") {
        return Ok(PathBuf::from(url));
    }

    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.to_file_path().ok())
        .ok_or_else(|| FetchError::InvalidFileUrl {
            url: url.to_string(),
        })
}
