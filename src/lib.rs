//! # Pharma Papers
//!
//! Finds PubMed articles with at least one author affiliated with a
//! pharmaceutical or biotech company, and reports them as CSV.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Typed PubMed records, normalized authors and report rows
//! - [`processing`]: Author normalization, affiliation classification and row aggregation
//! - [`sources`]: Record sources (PubMed E-utilities, in-memory mock)
//! - [`pipeline`]: Search, fetch and process a single query
//! - [`report`]: CSV and console output
//! - [`utils`]: Rate-limited HTTP client and retry helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod pipeline;
pub mod processing;
pub mod report;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{AuthorInfo, RawRecord, ReportRow};
pub use pipeline::{run_query, QueryOutcome};
pub use processing::process_articles;
pub use sources::{PubMedSource, RecordSource};
