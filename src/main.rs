use anyhow::{Context, Result};
use clap::Parser;
use pharma_papers::config::{find_config_file, load_config};
use pharma_papers::report::write_report;
use pharma_papers::sources::PubMedSource;
use pharma_papers::{run_query, QueryOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch PubMed papers matching QUERY, keep those with pharma/biotech affiliated
/// authors, and save the results to CSV or print them to the console.
#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find PubMed papers with pharmaceutical or biotech affiliated authors", long_about = None)]
struct Cli {
    /// PubMed search query
    query: String,

    /// CSV filename (prints to the console when omitted)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Email for the Entrez API (required by NCBI)
    #[arg(long)]
    email: String,

    /// NCBI API key (optional, allows higher request rates)
    #[arg(long)]
    api_key: Option<String>,

    /// Print debug information
    #[arg(long, short)]
    debug: bool,

    /// Suppress non-error log output
    #[arg(long, short, conflicts_with = "debug")]
    quiet: bool,

    /// Maximum number of PubMed records to retrieve
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    // Initialize tracing: --debug and --quiet win over the configured level
    let log_level = if cli.debug {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pharma_papers={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::debug!("Using config file: {}", path.display());
    }

    let credentials = config
        .credentials(Some(cli.email.clone()), cli.api_key.clone())
        .context("An email address is required for the Entrez API")?;
    let source = PubMedSource::from_config(&config, credentials)?;

    let max_results = cli.max_results.unwrap_or(config.search.max_results);

    let rows = match run_query(&source, &cli.query, max_results).await {
        QueryOutcome::NoMatches => {
            println!("No PubMed IDs found for this query.");
            return Ok(ExitCode::FAILURE);
        }
        QueryOutcome::Processed { rows, .. } => rows,
    };

    let mut stdout = std::io::stdout().lock();
    write_report(&rows, cli.file.as_deref(), &mut stdout).context("Failed to write report")?;

    Ok(ExitCode::SUCCESS)
}
