//! Record sources: where identifiers and raw records come from.
//!
//! The [`RecordSource`] trait has two fallible primitives, [`RecordSource::search`]
//! and [`RecordSource::fetch`], and two provided fail-soft wrappers,
//! [`RecordSource::search_ids`] and [`RecordSource::fetch_records`], that log a
//! retrieval failure and return an empty result instead of propagating it.
//!
//! - [`PubMedSource`]: NCBI E-utilities (esearch + efetch)
//! - [`MockSource`]: in-memory source for tests

pub mod mock;
mod pubmed;

pub use mock::MockSource;
pub use pubmed::{PubMedSource, FETCH_BATCH_SIZE, PUBMED_EUTILS_URL};

use crate::models::RawRecord;
use async_trait::async_trait;

/// A searchable store of bibliographic records
#[async_trait]
pub trait RecordSource: Send + Sync + std::fmt::Debug {
    /// Short identifier used in log output
    fn id(&self) -> &str;

    /// Identifiers of records matching `query`, at most `max_results`
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SourceError>;

    /// Full records for `ids`, in the order the source returns them
    async fn fetch(&self, ids: &[String]) -> Result<Vec<RawRecord>, SourceError>;

    /// Like [`search`](RecordSource::search), but a failure yields no identifiers
    async fn search_ids(&self, query: &str, max_results: usize) -> Vec<String> {
        match self.search(query, max_results).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(source = self.id(), "Failed to fetch PubMed IDs: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`fetch`](RecordSource::fetch), but a failure yields no records.
    ///
    /// An empty id list returns immediately without touching the source.
    async fn fetch_records(&self, ids: &[String]) -> Vec<RawRecord> {
        if ids.is_empty() {
            return Vec::new();
        }

        match self.fetch(ids).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(source = self.id(), "Failed to fetch paper details: {}", e);
                Vec::new()
            }
        }
    }
}

/// Errors that can occur when talking to a record source
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// Connection, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status other than 429
    #[error("API returned status {0}")]
    Status(u16),

    /// HTTP 429 from the source
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SourceError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Network(_) | SourceError::RateLimit => true,
            SourceError::Status(status) => *status >= 500,
            SourceError::Parse(_) | SourceError::InvalidRequest(_) => false,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<quick_xml::DeError> for SourceError {
    fn from(err: quick_xml::DeError) -> Self {
        SourceError::Parse(format!("Failed to decode XML: {}", err))
    }
}
