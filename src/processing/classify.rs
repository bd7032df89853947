//! Lexical affiliation classifier.
//!
//! An author is non-academic when any affiliation either names an industry marker,
//! or carries text without any academic marker. The second rule deliberately leans
//! towards industry for unrecognized institutions.

/// Substrings marking a commercial entity
pub const INDUSTRY_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "inc",
    "ltd",
    "llc",
    "gmbh",
    "ag",
    "corporation",
    "company",
    "laboratories",
    "lab",
];

/// Substrings marking an academic institution
pub const ACADEMIC_KEYWORDS: &[&str] = &["university", "college", "institute", "hospital", "school"];

/// Whether the affiliation contains an industry keyword (case-insensitive)
pub fn has_industry_keyword(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();
    INDUSTRY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn has_academic_keyword(lower: &str) -> bool {
    ACADEMIC_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Classify an author from their affiliations, evaluated in order.
///
/// The industry check runs before the academic check, so "Pharma Institute"
/// is non-academic. Authors with no affiliation text are academic.
pub fn is_non_academic<S: AsRef<str>>(affiliations: &[S]) -> bool {
    affiliations.iter().map(AsRef::as_ref).any(|affiliation| {
        if has_industry_keyword(affiliation) {
            return true;
        }
        !has_academic_keyword(&affiliation.to_lowercase()) && !affiliation.trim().is_empty()
    })
}
