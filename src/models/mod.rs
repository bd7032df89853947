//! Core data models for PubMed records and the report derived from them.

mod record;
mod report;

pub use record::{
    AffiliationInfo, Article, Author, AuthorList, Journal, JournalIssue, MedlineCitation,
    PubDate, PubmedArticle, PubmedArticleSet, RawRecord,
};
pub use report::{AuthorInfo, ReportRow};
