//! End-to-end query processing: search, fetch, classify, aggregate.

use crate::models::ReportRow;
use crate::processing::process_articles;
use crate::sources::RecordSource;

/// Result of running one query through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The search returned no identifiers
    NoMatches,

    /// Records were fetched and processed
    Processed {
        /// Number of records the source returned
        fetched: usize,
        /// Rows for articles with at least one non-academic author
        rows: Vec<ReportRow>,
    },
}

impl QueryOutcome {
    /// Rows produced, empty for [`QueryOutcome::NoMatches`]
    pub fn rows(&self) -> &[ReportRow] {
        match self {
            QueryOutcome::NoMatches => &[],
            QueryOutcome::Processed { rows, .. } => rows,
        }
    }
}

/// Run `query` against `source`, keeping at most `max_results` articles.
///
/// Retrieval failures have already been absorbed by the source's fail-soft
/// wrappers, so a failed search surfaces as [`QueryOutcome::NoMatches`].
pub async fn run_query(source: &dyn RecordSource, query: &str, max_results: usize) -> QueryOutcome {
    tracing::debug!(source = source.id(), "Searching for: {}", query);

    let ids = source.search_ids(query, max_results).await;
    tracing::debug!("Found PMIDs: {:?}", ids);

    if ids.is_empty() {
        return QueryOutcome::NoMatches;
    }

    let articles = source.fetch_records(&ids).await;
    tracing::debug!("Retrieved {} article(s).", articles.len());

    let rows = process_articles(&articles);
    tracing::debug!("{} article(s) matched non-academic criteria.", rows.len());

    QueryOutcome::Processed {
        fetched: articles.len(),
        rows,
    }
}
