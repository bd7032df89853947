//! Per-article aggregation into report rows.

use crate::models::{AuthorInfo, PubDate, PubmedArticle, ReportRow};

use super::classify::{has_industry_keyword, is_non_academic};
use super::normalize::extract_author_info;

/// Assemble "year[-month][-day]" from the parts that are present.
///
/// Without a year the date is empty, whatever else is set. Missing parts are
/// skipped rather than left as empty slots, so year and day give "year-day".
pub fn publication_date(date: &PubDate) -> String {
    let Some(year) = &date.year else {
        return String::new();
    };

    let mut assembled = year.clone();
    for part in [&date.month, &date.day].into_iter().flatten() {
        assembled.push('-');
        assembled.push_str(part);
    }
    assembled
}

/// Build the row for one article, or `None` if no author is non-academic
pub fn build_report_row(article: &PubmedArticle) -> Option<ReportRow> {
    let authors = extract_author_info(article);

    let mut non_academic_authors = Vec::new();
    let mut company_affiliations: Vec<String> = Vec::new();
    let mut corresponding_email: Option<&str> = None;

    for author in &authors {
        if is_non_academic(&author.affiliations) {
            non_academic_authors.push(author.name.clone());
            for affiliation in industry_affiliations(author) {
                if !company_affiliations.iter().any(|seen| seen == affiliation) {
                    company_affiliations.push(affiliation.clone());
                }
            }
        }

        if corresponding_email.is_none() {
            corresponding_email = author.email.as_deref().filter(|email| !email.is_empty());
        }
    }

    if non_academic_authors.is_empty() {
        return None;
    }

    Some(ReportRow {
        pubmed_id: article.pmid().to_string(),
        title: article.title().to_string(),
        publication_date: publication_date(article.pub_date()),
        non_academic_authors,
        company_affiliations,
        corresponding_email: corresponding_email.unwrap_or_default().to_string(),
    })
}

fn industry_affiliations(author: &AuthorInfo) -> impl Iterator<Item = &String> {
    author
        .affiliations
        .iter()
        .filter(|affiliation| has_industry_keyword(affiliation))
}

/// Transform a batch of articles into rows, in input order.
///
/// Articles without a non-academic author are dropped.
pub fn process_articles(articles: &[PubmedArticle]) -> Vec<ReportRow> {
    articles.iter().filter_map(build_report_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AffiliationInfo, Author, AuthorList};

    fn author(last: &str, fore: &str, affiliations: &[&str]) -> Author {
        Author {
            last_name: Some(last.to_string()),
            fore_name: Some(fore.to_string()),
            affiliation_info: affiliations
                .iter()
                .map(|a| AffiliationInfo {
                    affiliation: Some(a.to_string()),
                })
                .collect(),
        }
    }

    fn article(pmid: &str, title: &str, authors: Vec<Author>) -> PubmedArticle {
        let mut article = PubmedArticle::default();
        article.citation.pmid = Some(pmid.to_string());
        article.citation.article.title = Some(title.to_string());
        article.citation.article.author_list = Some(AuthorList { authors });
        article
    }

    fn date(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> PubDate {
        PubDate {
            year: year.map(String::from),
            month: month.map(String::from),
            day: day.map(String::from),
        }
    }

    #[test]
    fn test_publication_date_assembly() {
        assert_eq!(publication_date(&date(Some("2020"), Some("05"), None)), "2020-05");
        assert_eq!(publication_date(&date(Some("2020"), None, None)), "2020");
        assert_eq!(publication_date(&date(None, None, None)), "");
        assert_eq!(
            publication_date(&date(Some("2020"), Some("May"), Some("07"))),
            "2020-May-07"
        );
    }

    #[test]
    fn test_publication_date_skips_missing_month() {
        assert_eq!(publication_date(&date(Some("2020"), None, Some("07"))), "2020-07");
    }

    #[test]
    fn test_publication_date_requires_year() {
        assert_eq!(publication_date(&date(None, Some("05"), Some("07"))), "");
    }

    #[test]
    fn test_row_for_mixed_authors() {
        let mut art = article(
            "123",
            "Drug X Trial",
            vec![
                author("Doe", "Jane", &["Massachusetts Institute of Technology"]),
                author("Roe", "John", &["Genentech Inc", "john@genentech.com"]),
            ],
        );
        art.citation.article.journal.issue.pub_date = date(Some("2021"), Some("02"), None);

        let row = build_report_row(&art).unwrap();
        assert_eq!(row.pubmed_id, "123");
        assert_eq!(row.title, "Drug X Trial");
        assert_eq!(row.publication_date, "2021-02");
        assert_eq!(row.non_academic_authors, vec!["Roe John"]);
        assert_eq!(row.company_affiliations, vec!["Genentech Inc"]);
        assert_eq!(row.corresponding_email, "john@genentech.com");
    }

    #[test]
    fn test_no_row_when_all_academic() {
        let art = article(
            "1",
            "Academic only",
            vec![
                author("Doe", "Jane", &["Stanford University"]),
                author("Poe", "Ann", &["Harvard Medical School"]),
            ],
        );
        assert_eq!(build_report_row(&art), None);
    }

    #[test]
    fn test_no_row_without_authors() {
        let mut art = PubmedArticle::default();
        art.citation.pmid = Some("7".to_string());
        assert_eq!(build_report_row(&art), None);
    }

    #[test]
    fn test_only_industry_affiliations_in_company_set() {
        let art = article(
            "2",
            "T",
            vec![author("Roe", "John", &["Stanford University", "Moderna Inc"])],
        );

        let row = build_report_row(&art).unwrap();
        assert_eq!(row.company_affiliations, vec!["Moderna Inc"]);
    }

    #[test]
    fn test_default_industry_match_not_in_company_set() {
        let art = article("3", "T", vec![author("Roe", "John", &["XYZ Research Group"])]);

        let row = build_report_row(&art).unwrap();
        assert_eq!(row.non_academic_authors, vec!["Roe John"]);
        assert!(row.company_affiliations.is_empty());
    }

    #[test]
    fn test_company_set_deduplicates_in_first_seen_order() {
        let art = article(
            "4",
            "T",
            vec![
                author("A", "One", &["Beta Biotech", "Acme Pharma"]),
                author("B", "Two", &["Acme Pharma", "Gamma Ltd"]),
            ],
        );

        let row = build_report_row(&art).unwrap();
        assert_eq!(
            row.company_affiliations,
            vec!["Beta Biotech", "Acme Pharma", "Gamma Ltd"]
        );
    }

    #[test]
    fn test_email_taken_from_academic_author_too() {
        let art = article(
            "5",
            "T",
            vec![
                author("Doe", "Jane", &["Stanford University, jane@stanford.edu"]),
                author("Roe", "John", &["Acme Pharma", "john@acme.com"]),
            ],
        );

        let row = build_report_row(&art).unwrap();
        assert_eq!(row.corresponding_email, "Stanford University, jane@stanford.edu");
        assert_eq!(row.non_academic_authors, vec!["Roe John"]);
    }

    #[test]
    fn test_missing_title_and_pmid_degrade_to_empty() {
        let mut art = PubmedArticle::default();
        art.citation.article.author_list = Some(AuthorList {
            authors: vec![author("Roe", "John", &["Acme Pharma"])],
        });

        let row = build_report_row(&art).unwrap();
        assert_eq!(row.pubmed_id, "");
        assert_eq!(row.title, "");
        assert_eq!(row.publication_date, "");
        assert_eq!(row.corresponding_email, "");
    }

    #[test]
    fn test_process_articles_keeps_input_order_and_drops_academic() {
        let articles = vec![
            article("10", "A", vec![author("X", "Y", &["Acme Pharma"])]),
            article("11", "B", vec![author("X", "Y", &["Stanford University"])]),
            article("12", "C", vec![author("X", "Y", &["Pfizer Inc"])]),
        ];

        let ids: Vec<_> = process_articles(&articles)
            .into_iter()
            .map(|row| row.pubmed_id)
            .collect();
        assert_eq!(ids, vec!["10", "12"]);
    }

    #[test]
    fn test_process_articles_is_repeatable() {
        let articles = vec![
            article("20", "A", vec![author("X", "Y", &["Acme Pharma", "x@acme.com"])]),
            article("21", "B", vec![author("X", "Y", &["Beta Ltd"])]),
        ];

        assert_eq!(process_articles(&articles), process_articles(&articles));
    }
}
