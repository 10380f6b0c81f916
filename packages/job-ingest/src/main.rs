// Entry point for the job-ingest CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_ingest::{
    Config, Dataflow, InspectSink, JsonSource, JsonToDocuments, ListingFetcher, ListingSource,
    MemoryCache, QueryKey, QuotaRateLimiter,
};
use jsearch_client::JSearchClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "job-ingest", about = "Fetch job listings and convert them into documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch listings for each query and print them
    Fetch {
        /// Query key to search for (repeatable). Defaults to JSEARCH_QUERIES.
        #[arg(short, long = "query")]
        queries: Vec<String>,

        /// Seconds between API requests
        #[arg(long)]
        cooldown_secs: Option<u64>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Convert stored search payloads into documents (JSON on stdout)
    Convert {
        /// JSON files holding `{"data": [...]}` payloads
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Flatten this nested field of each item into dotted keys
        #[arg(long)]
        flatten_field: Option<String>,

        /// Disable per-file progress logging
        #[arg(long)]
        no_progress: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_ingest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Fetch {
            queries,
            cooldown_secs,
            timeout_secs,
        } => fetch(queries, cooldown_secs, timeout_secs).await,
        Command::Convert {
            files,
            flatten_field,
            no_progress,
        } => convert(files, flatten_field, !no_progress),
    }
}

async fn fetch(queries: Vec<String>, cooldown_secs: Option<u64>, timeout_secs: Option<u64>) -> Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if !queries.is_empty() {
        config = config
            .with_queries(queries.into_iter().map(QueryKey::from).collect())
            .context("Invalid --query arguments")?;
    }
    if let Some(secs) = cooldown_secs {
        config.cooldown = Duration::from_secs(secs);
    }
    if let Some(secs) = timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }

    if config.api_key.is_none() {
        tracing::warn!("Neither JSEARCH_API_KEY nor api_key is set; requests will be rejected by the API");
    }
    tracing::info!(queries = config.queries.len(), cooldown = ?config.cooldown, "Configuration loaded");

    let client = JSearchClient::with_timeout(config.api_key_or_empty(), config.timeout)
        .context("Failed to build JSearch client")?
        .with_base_url(config.base_url.as_str());

    let fetcher = Arc::new(ListingFetcher::new(
        client,
        MemoryCache::new(),
        QuotaRateLimiter::new(config.cooldown),
    ));
    let source = ListingSource::new(config.queries, fetcher);

    let summary = Dataflow::new("linkedin_jobs")
        .run(&source, &mut InspectSink::stdout())
        .await
        .context("Dataflow failed")?;

    tracing::info!(
        partitions = summary.partitions,
        listings = summary.items,
        "Fetch complete"
    );
    Ok(())
}

fn convert(files: Vec<PathBuf>, flatten_field: Option<String>, progress: bool) -> Result<()> {
    let mut converter = JsonToDocuments::new().with_progress(progress);
    if let Some(field) = flatten_field {
        converter = converter.with_flatten_field(field);
    }

    let sources: Vec<JsonSource> = files.into_iter().map(JsonSource::from).collect();
    let output = converter.run(&sources);

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &output).context("Failed to write documents")?;
    println!();

    if !output.skipped.is_empty() {
        tracing::warn!(skipped = output.skipped.len(), "Some sources were skipped");
    }
    Ok(())
}
