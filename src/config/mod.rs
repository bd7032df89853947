//! Configuration management.
//!
//! Settings come from an optional TOML file overlaid with `PHARMA_PAPERS_*`
//! environment variables (nested keys separated by `__`, e.g.
//! `PHARMA_PAPERS_ENTREZ__API_KEY`). Command-line flags override both.
//!
//! ```toml
//! [entrez]
//! email = "you@example.org"
//! api_key = "0123456789abcdef"
//! tool = "pharma-papers"
//! timeout_seconds = 30
//!
//! [search]
//! max_results = 20
//!
//! [retry]
//! max_attempts = 3
//! initial_delay_ms = 500
//! max_delay_ms = 10000
//! backoff_multiplier = 2.0
//!
//! [logging]
//! level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sources::PUBMED_EUTILS_URL;
use crate::utils::RetryConfig;

pub use config::ConfigError;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pharma-papers.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PHARMA_PAPERS";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub entrez: EntrezConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub retry: RetrySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// NCBI E-utilities settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrezConfig {
    /// Contact email sent with every request
    #[serde(default)]
    pub email: Option<String>,

    /// API key (optional, raises the rate limit to 10 requests/s)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Tool name sent with every request
    #[serde(default = "default_tool")]
    pub tool: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for EntrezConfig {
    fn default() -> Self {
        Self {
            email: None,
            api_key: None,
            tool: default_tool(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl EntrezConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_tool() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_base_url() -> String {
    PUBMED_EUTILS_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on identifiers returned by a search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    20
}

/// Retry settings for transient retrieval failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetrySettings {
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts.max(1),
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            backoff_multiplier: self.backoff_multiplier.max(1.0),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Credentials identifying the caller to E-utilities.
///
/// Built once per invocation and handed to the source that uses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrezCredentials {
    pub email: String,
    pub api_key: Option<String>,
    pub tool: String,
}

impl EntrezCredentials {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: None,
            tool: default_tool(),
        }
    }

    pub fn api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Query parameters appended to every E-utilities request
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("tool", self.tool.as_str()), ("email", self.email.as_str())];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }
        params
    }
}

impl Config {
    /// Credentials from this configuration, with command-line values taking precedence.
    ///
    /// Returns `None` when no email is known.
    pub fn credentials(
        &self,
        email: Option<String>,
        api_key: Option<String>,
    ) -> Option<EntrezCredentials> {
        let email = email.or_else(|| self.entrez.email.clone())?;
        Some(
            EntrezCredentials::new(email)
                .api_key(api_key.or_else(|| self.entrez.api_key.clone()))
                .tool(self.entrez.tool.clone()),
        )
    }
}

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// Find a configuration file in the default locations.
///
/// Checks `./pharma-papers.toml`, then `<config dir>/pharma-papers/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .filter(|path| path.is_file())
}
