//! Utility modules supporting record retrieval.
//!
//! - [`HttpClient`]: HTTP client with built-in rate limiting
//! - [`RetryConfig`]: Configuration for retry logic with exponential backoff
//! - [`with_retry`]: Execute an operation with automatic retry on transient errors
//!
//! # Retry with Backoff
//!
//! ```rust,no_run
//! use pharma_papers::utils::{with_retry, HttpClient, RetryConfig};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::for_eutils(false, Duration::from_secs(30))?;
//! let _body = with_retry(RetryConfig::default(), || {
//!     client.get_text("https://eutils.ncbi.nlm.nih.gov/entrez/eutils/einfo.fcgi")
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

mod http;
mod retry;

pub use http::HttpClient;
pub use retry::{with_retry, RetryConfig};
