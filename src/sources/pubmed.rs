//! PubMed record source implementation using E-utilities API.

use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{Config, EntrezCredentials};
use crate::models::{PubmedArticleSet, RawRecord};
use crate::sources::{RecordSource, SourceError};
use crate::utils::{with_retry, HttpClient, RetryConfig};

/// PubMed E-utilities API base URL
pub const PUBMED_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Most identifiers NCBI accepts in a single GET efetch request
pub const FETCH_BATCH_SIZE: usize = 200;

/// PubMed record source
///
/// Uses NCBI E-utilities: `esearch` for identifiers and `efetch` for full records.
/// Credentials are sent with every request.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    base_url: String,
    credentials: EntrezCredentials,
    retry: RetryConfig,
}

impl PubMedSource {
    /// Create a source against the public E-utilities endpoint
    pub fn new(credentials: EntrezCredentials) -> Result<Self, SourceError> {
        Self::from_config(&Config::default(), credentials)
    }

    /// Create a source using the endpoint, timeout and retry settings of `config`
    pub fn from_config(config: &Config, credentials: EntrezCredentials) -> Result<Self, SourceError> {
        let client = HttpClient::for_eutils(credentials.api_key.is_some(), config.entrez.timeout())?;
        Ok(Self::with_client(
            Arc::new(client),
            &config.entrez.base_url,
            credentials,
            config.retry.retry_config(),
        ))
    }

    /// Create with a custom HTTP client and endpoint (for testing)
    pub fn with_client(
        client: Arc<HttpClient>,
        base_url: &str,
        credentials: EntrezCredentials,
        retry: RetryConfig,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            retry,
        }
    }

    fn encode_params(&self, params: &[(&str, &str)]) -> String {
        let mut all: Vec<(&str, &str)> = params.to_vec();
        all.extend(self.credentials.query_params());

        all.iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Build E-utilities search URL
    fn build_search_url(&self, query: &str, max_results: usize) -> String {
        let retmax = max_results.to_string();
        let params = [("db", "pubmed"), ("term", query), ("retmax", retmax.as_str())];
        format!("{}/esearch.fcgi?{}", self.base_url, self.encode_params(&params))
    }

    /// Build E-utilities fetch URL for specific PubMed IDs
    fn build_fetch_url(&self, ids: &[String]) -> String {
        let ids = ids.join(",");
        let params = [
            ("db", "pubmed"),
            ("id", ids.as_str()),
            ("rettype", "medline"),
            ("retmode", "xml"),
        ];
        format!("{}/efetch.fcgi?{}", self.base_url, self.encode_params(&params))
    }

    /// Parse E-utilities search response XML
    fn parse_search_response(xml: &str) -> Result<Vec<String>, SourceError> {
        #[derive(Debug, Deserialize)]
        struct ESearchResult {
            #[serde(rename = "IdList", default)]
            id_list: IdList,
            #[serde(rename = "ERROR", default)]
            error: Option<String>,
        }

        #[derive(Debug, Default, Deserialize)]
        struct IdList {
            #[serde(rename = "Id", default)]
            ids: Vec<String>,
        }

        let result: ESearchResult = from_str(xml)?;

        if let Some(error) = result.error.filter(|e| !e.trim().is_empty()) {
            return Err(SourceError::InvalidRequest(error));
        }

        Ok(result.id_list.ids)
    }

    /// Parse E-utilities fetch response XML
    fn parse_fetch_response(xml: &str) -> Result<Vec<RawRecord>, SourceError> {
        Ok(PubmedArticleSet::from_xml(xml)?.articles)
    }

    async fn get_xml(&self, url: &str) -> Result<String, SourceError> {
        let client = &self.client;
        with_retry(self.retry, move || client.get_text(url)).await
    }
}

#[async_trait]
impl RecordSource for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SourceError> {
        let url = self.build_search_url(query, max_results);
        let xml = self.get_xml(&url).await?;
        let ids = Self::parse_search_response(&xml)?;

        tracing::debug!(query, count = ids.len(), "PubMed search complete");
        Ok(ids)
    }

    async fn fetch(&self, ids: &[String]) -> Result<Vec<RawRecord>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = Vec::with_capacity(ids.len());
        for batch in ids.chunks(FETCH_BATCH_SIZE) {
            let url = self.build_fetch_url(batch);
            let xml = self.get_xml(&url).await?;
            records.extend(Self::parse_fetch_response(&xml)?);
        }

        tracing::debug!(requested = ids.len(), received = records.len(), "PubMed fetch complete");
        Ok(records)
    }
}
