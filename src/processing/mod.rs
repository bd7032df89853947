//! Extraction and classification engine.
//!
//! Raw records flow through three stages:
//!
//! - [`extract_author_info`]: normalize author sub-records into [`AuthorInfo`](crate::models::AuthorInfo)
//! - [`is_non_academic`]: lexical affiliation heuristic
//! - [`process_articles`]: aggregate per-article results into [`ReportRow`](crate::models::ReportRow)s
//!
//! The engine is pure: the same input always gives the same rows.

mod aggregate;
mod classify;
mod normalize;

pub use aggregate::{build_report_row, process_articles, publication_date};
pub use classify::{has_industry_keyword, is_non_academic, ACADEMIC_KEYWORDS, INDUSTRY_KEYWORDS};
pub use normalize::extract_author_info;
