//! Author normalization: raw author sub-records into [`AuthorInfo`].

use crate::models::{Author, AuthorInfo, PubmedArticle};

impl AuthorInfo {
    /// Build the normalized view of one author sub-record.
    ///
    /// Missing name parts contribute nothing, affiliation entries without text are
    /// skipped, and the email is the first affiliation containing `@`.
    pub fn from_raw(author: &Author) -> Self {
        let name = [author.last_name.as_deref(), author.fore_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        let affiliations: Vec<String> = author
            .affiliation_info
            .iter()
            .filter_map(|info| info.affiliation.clone())
            .collect();

        let email = affiliations.iter().find(|aff| aff.contains('@')).cloned();

        Self {
            name,
            affiliations,
            email,
        }
    }
}

/// Normalize every author of an article, preserving author order
pub fn extract_author_info(article: &PubmedArticle) -> Vec<AuthorInfo> {
    article.authors().iter().map(AuthorInfo::from_raw).collect()
}
