//! Report sink: renders rows as CSV or as console lines.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::ReportRow;

/// What the sink did with a batch of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// There were no rows; nothing was written
    NoData,
    /// Rows were written as CSV to `path`
    Saved { path: PathBuf, count: usize },
    /// Rows were printed to the console
    Printed { count: usize },
}

/// Errors that can occur while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `rows` to `destination` as CSV, or to `console` as text lines.
///
/// Status messages ("No data to write", "Saved N records to ...") go to
/// `console` as well.
pub fn write_report<W: Write>(
    rows: &[ReportRow],
    destination: Option<&Path>,
    console: &mut W,
) -> Result<ReportOutcome, ReportError> {
    if rows.is_empty() {
        writeln!(console, "No data to write")?;
        return Ok(ReportOutcome::NoData);
    }

    match destination {
        Some(path) => {
            let count = write_csv(rows, File::create(path)?)?;
            writeln!(console, "Saved {} records to '{}'", count, path.display())?;
            tracing::debug!(path = %path.display(), count, "CSV report written");
            Ok(ReportOutcome::Saved {
                path: path.to_path_buf(),
                count,
            })
        }
        None => {
            let count = print_rows(rows, console)?;
            Ok(ReportOutcome::Printed { count })
        }
    }
}

/// Write a header plus one record per row; returns the number of data rows
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<usize, ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ReportRow::COLUMNS)?;
    for row in rows {
        csv_writer.write_record(row.values())?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

/// Print each row as `key: value` pairs joined by ", "
pub fn print_rows<W: Write>(rows: &[ReportRow], out: &mut W) -> Result<usize, ReportError> {
    for row in rows {
        writeln!(out, "{}", format_row(row))?;
    }
    Ok(rows.len())
}

/// Human-readable single-line rendering of a row
pub fn format_row(row: &ReportRow) -> String {
    row.fields()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_row() -> ReportRow {
        ReportRow {
            pubmed_id: "123".to_string(),
            title: "Drug X, a trial".to_string(),
            publication_date: "2020-05".to_string(),
            non_academic_authors: vec!["Roe John".to_string()],
            company_affiliations: vec!["Genentech Inc".to_string()],
            corresponding_email: "john@genentech.com".to_string(),
        }
    }

    #[test]
    fn test_no_data() {
        let mut console = Vec::new();
        let outcome = write_report(&[], None, &mut console).unwrap();

        assert_eq!(outcome, ReportOutcome::NoData);
        assert_eq!(String::from_utf8(console).unwrap(), "No data to write\n");
    }

    #[test]
    fn test_no_data_does_not_create_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut console = Vec::new();

        write_report(&[], Some(&path), &mut console).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_console_output() {
        let mut console = Vec::new();
        let outcome = write_report(&[sample_row()], None, &mut console).unwrap();

        assert_eq!(outcome, ReportOutcome::Printed { count: 1 });
        assert_eq!(
            String::from_utf8(console).unwrap(),
            "PubmedID: 123, Title: Drug X, a trial, Publication Date: 2020-05, \
             Non-academic Author(s): Roe John, Company Affiliation(s): Genentech Inc, \
             Corresponding Author Email: john@genentech.com\n"
        );
    }

    #[test]
    fn test_csv_file_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut console = Vec::new();

        let rows = vec![sample_row(), ReportRow::default()];
        let outcome = write_report(&rows, Some(&path), &mut console).unwrap();

        assert_eq!(
            outcome,
            ReportOutcome::Saved {
                path: path.clone(),
                count: 2
            }
        );
        assert!(String::from_utf8(console)
            .unwrap()
            .starts_with("Saved 2 records to '"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, ReportRow::COLUMNS.to_vec());

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "Drug X, a trial");
        assert_eq!(&records[0][4], "Genentech Inc");
        assert_eq!(&records[1][0], "");
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let mut buffer = Vec::new();
        write_csv(&[sample_row()], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("PubmedID,Title,Publication Date,"));
        assert!(text.contains("\"Drug X, a trial\""));
    }
}
