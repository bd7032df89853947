//! Typed view of a PubMed efetch record.
//!
//! Every element the pipeline reads is optional or defaulted, so a sparse record
//! decodes into empty values instead of failing. Elements the pipeline never
//! reads (including `PubmedBookArticle` entries) are ignored by the deserializer.

use quick_xml::events::Event;
use quick_xml::{DeError, Reader, Writer};
use serde::{Deserialize, Deserializer};

/// A raw bibliographic record as returned by the record source.
pub type RawRecord = PubmedArticle;

/// Inline formatting elements PubMed allows inside titles and affiliations
const INLINE_MARKUP: &[&[u8]] = &[b"i", b"b", b"u", b"sup", b"sub"];

/// Root element of an efetch response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PubmedArticleSet {
    #[serde(rename = "PubmedArticle", default)]
    pub articles: Vec<PubmedArticle>,
}

impl PubmedArticleSet {
    /// Decode an efetch response.
    ///
    /// Inline formatting such as `<i>E. coli</i>` is flattened into the
    /// surrounding text first, so `ArticleTitle` and `Affiliation` always decode
    /// as plain strings.
    pub fn from_xml(xml: &str) -> Result<Self, DeError> {
        let flattened = flatten_inline_markup(xml)?;
        quick_xml::de::from_str(&flattened)
    }
}

fn is_inline_markup(name: &[u8]) -> bool {
    INLINE_MARKUP.contains(&name)
}

/// Re-emit `xml` without the start and end tags of inline formatting elements.
/// Their text content stays in place, next to the text around it.
fn flatten_inline_markup(xml: &str) -> Result<String, DeError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(tag) | Event::Empty(tag) if is_inline_markup(tag.local_name().as_ref()) => {}
            Event::End(tag) if is_inline_markup(tag.local_name().as_ref()) => {}
            event => writer
                .write_event(event)
                .map_err(|e| DeError::Custom(e.to_string()))?,
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| DeError::Custom(e.to_string()))
}

/// One article entry in a `PubmedArticleSet`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PubmedArticle {
    #[serde(rename = "MedlineCitation", default)]
    pub citation: MedlineCitation,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MedlineCitation {
    /// PubMed identifier
    #[serde(rename = "PMID", default, deserialize_with = "text_node")]
    pub pmid: Option<String>,

    #[serde(rename = "Article", default)]
    pub article: Article,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Article {
    #[serde(rename = "Journal", default)]
    pub journal: Journal,

    #[serde(rename = "ArticleTitle", default, deserialize_with = "text_node")]
    pub title: Option<String>,

    #[serde(rename = "AuthorList", default)]
    pub author_list: Option<AuthorList>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Journal {
    #[serde(rename = "JournalIssue", default)]
    pub issue: JournalIssue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JournalIssue {
    #[serde(rename = "PubDate", default)]
    pub pub_date: PubDate,
}

/// Publication date parts, each carried verbatim (months may be "05" or "May")
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PubDate {
    #[serde(rename = "Year", default)]
    pub year: Option<String>,

    #[serde(rename = "Month", default)]
    pub month: Option<String>,

    #[serde(rename = "Day", default)]
    pub day: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthorList {
    #[serde(rename = "Author", default)]
    pub authors: Vec<Author>,
}

/// A single author sub-record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Author {
    #[serde(rename = "LastName", default)]
    pub last_name: Option<String>,

    #[serde(rename = "ForeName", default)]
    pub fore_name: Option<String>,

    #[serde(rename = "AffiliationInfo", default)]
    pub affiliation_info: Vec<AffiliationInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AffiliationInfo {
    #[serde(rename = "Affiliation", default)]
    pub affiliation: Option<String>,
}

impl PubmedArticle {
    /// PubMed identifier, empty when the record carries none
    pub fn pmid(&self) -> &str {
        self.citation.pmid.as_deref().unwrap_or_default()
    }

    /// Article title, empty when absent
    pub fn title(&self) -> &str {
        self.citation.article.title.as_deref().unwrap_or_default()
    }

    pub fn pub_date(&self) -> &PubDate {
        &self.citation.article.journal.issue.pub_date
    }

    /// Author sub-records in their original order
    pub fn authors(&self) -> &[Author] {
        self.citation
            .article
            .author_list
            .as_ref()
            .map(|list| list.authors.as_slice())
            .unwrap_or_default()
    }
}

/// Element whose attributes we skip and whose text we keep, e.g. `<PMID Version="1">`
#[derive(Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

fn text_node<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextNode>::deserialize(deserializer)?.map(|node| node.value))
}
