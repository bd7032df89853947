//! Entities derived from raw records: normalized authors and report rows.

/// Normalized author derived from one raw author sub-record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorInfo {
    /// "LastName ForeName", empty when neither part is present
    pub name: String,

    /// Free-text affiliations in record order
    pub affiliations: Vec<String>,

    /// First affiliation containing '@', taken verbatim
    pub email: Option<String>,
}

/// One output row: an article with at least one non-academic author
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    pub pubmed_id: String,
    pub title: String,
    pub publication_date: String,

    /// Names of non-academic authors in author order
    pub non_academic_authors: Vec<String>,

    /// Industry affiliations in first-seen order, without duplicates
    pub company_affiliations: Vec<String>,

    /// First email found across all authors, empty if none
    pub corresponding_email: String,
}

impl ReportRow {
    /// Output column names, in output order
    pub const COLUMNS: [&'static str; 6] = [
        "PubmedID",
        "Title",
        "Publication Date",
        "Non-academic Author(s)",
        "Company Affiliation(s)",
        "Corresponding Author Email",
    ];

    /// Rendered cell values, aligned with [`ReportRow::COLUMNS`]
    pub fn values(&self) -> [String; 6] {
        [
            self.pubmed_id.clone(),
            self.title.clone(),
            self.publication_date.clone(),
            self.non_academic_authors.join("; "),
            self.company_affiliations.join("; "),
            self.corresponding_email.clone(),
        ]
    }

    /// Column name / value pairs in output order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, String)> {
        Self::COLUMNS.into_iter().zip(self.values())
    }
}
