//! HTTP client utilities.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, StatusCode};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::sources::SourceError;

/// Shared HTTP client with a per-client request rate limit
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl HttpClient {
    /// Create a client allowed `requests_per_second`, with the given request timeout
    pub fn new(requests_per_second: NonZeroU32, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SourceError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(requests_per_second))),
        })
    }

    /// Client honouring the NCBI E-utilities policy: 10 requests/s with an API key, 3 without
    pub fn for_eutils(has_api_key: bool, timeout: Duration) -> Result<Self, SourceError> {
        let rate = if has_api_key {
            nonzero!(10u32)
        } else {
            nonzero!(3u32)
        };
        Self::new(rate, timeout)
    }

    /// GET `url` and return the body as text.
    ///
    /// Waits for the rate limiter first. 429 maps to [`SourceError::RateLimit`],
    /// any other non-success status to [`SourceError::Status`].
    pub async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        self.limiter.until_ready().await;

        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
