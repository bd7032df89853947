//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{AffiliationInfo, Author, AuthorList, PubmedArticle, RawRecord};
use crate::sources::{RecordSource, SourceError};

/// A mock source that serves predefined records from memory.
///
/// `search` returns the ids of the stored records, `fetch` returns the stored
/// records whose id was requested. A configured failure applies to both.
#[derive(Debug, Default)]
pub struct MockSource {
    records: Mutex<Vec<RawRecord>>,
    failure: Mutex<Option<SourceError>>,
    fetch_calls: AtomicUsize,
}

impl MockSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source serving the given records.
    pub fn with_records(records: Vec<RawRecord>) -> Self {
        let source = Self::new();
        *lock(&source.records) = records;
        source
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: SourceError) {
        *lock(&self.failure) = Some(error);
    }

    /// Clear the configured failure.
    pub fn clear_failure(&self) {
        *lock(&self.failure) = None;
    }

    /// Number of times `fetch` reached the source
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), SourceError> {
        match lock(&self.failure).as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RecordSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<String>, SourceError> {
        self.check_failure()?;
        Ok(lock(&self.records)
            .iter()
            .map(|record| record.pmid().to_string())
            .take(max_results)
            .collect())
    }

    async fn fetch(&self, ids: &[String]) -> Result<Vec<RawRecord>, SourceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(lock(&self.records)
            .iter()
            .filter(|record| ids.iter().any(|id| id == record.pmid()))
            .cloned()
            .collect())
    }
}

/// Helper function to create a record for testing.
///
/// Each author is `(last_name, fore_name, affiliations)`.
pub fn make_record(pmid: &str, title: &str, authors: &[(&str, &str, &[&str])]) -> PubmedArticle {
    let mut record = PubmedArticle::default();
    record.citation.pmid = Some(pmid.to_string());
    record.citation.article.title = Some(title.to_string());
    record.citation.article.author_list = Some(AuthorList {
        authors: authors
            .iter()
            .map(|(last, fore, affiliations)| Author {
                last_name: Some(last.to_string()),
                fore_name: Some(fore.to_string()),
                affiliation_info: affiliations
                    .iter()
                    .map(|affiliation| AffiliationInfo {
                        affiliation: Some(affiliation.to_string()),
                    })
                    .collect(),
            })
            .collect(),
    });
    record
}
