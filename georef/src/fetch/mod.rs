//! Network fetcher abstraction for scene image downloads.
//!
//! The cache store downloads scene quicklooks through an injected
//! [`ImageFetcher`] rather than a concrete HTTP client. This keeps the store
//! testable with mock fetchers and keeps network policy (TLS, timeouts) in
//! one place. The trait uses `Pin<Box<dyn Future>>` so it stays
//! dyn-compatible (`Arc<dyn ImageFetcher>`).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors that can occur while fetching a scene image.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The HTTP client itself could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("Transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The download did not complete within the allotted timeout.
    #[error("Fetch of {url} timed out after {timeout_secs}s")]
    TimedOut { url: String, timeout_secs: u64 },
}

/// Trait for downloading a scene image by URL.
///
/// Implementations must apply the given timeout to the whole request and
/// fail cleanly on expiry; the cache store additionally guards the call so a
/// misbehaving implementation cannot stall a feature forever.
pub trait ImageFetcher: Send + Sync {
    /// Download the resource at `url`, returning the raw body bytes.
    fn fetch(&self, url: &str, timeout: Duration) -> BoxFuture<'_, Result<Vec<u8>, FetchError>>;
}

/// Real fetcher backed by an async reqwest client (rustls TLS).
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

/// Map a reqwest error onto the fetch error taxonomy.
fn classify(e: reqwest::Error, url: &str, timeout: Duration) -> FetchError {
    if e.is_timeout() {
        FetchError::TimedOut {
            url: url.to_string(),
            timeout_secs: timeout.as_secs(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

impl ImageFetcher for ReqwestFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> BoxFuture<'_, Result<Vec<u8>, FetchError>> {
        let url = url.to_string();
        let request = self.client.get(&url).timeout(timeout);

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| classify(e, &url, timeout))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url,
                    status: status.as_u16(),
                });
            }

            match response.bytes().await {
                Ok(bytes) => Ok(bytes.to_vec()),
                Err(e) => Err(classify(e, &url, timeout)),
            }
        })
    }
}
