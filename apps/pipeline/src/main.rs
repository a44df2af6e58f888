mod config;
mod db;
mod enrichment;
mod errors;
mod fetcher;
mod intermediate;
mod matching;
mod models;
mod normalize;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, DatabaseConfig};

#[derive(Parser)]
#[command(
    name = "pipeline",
    about = "Pull candidate submissions, extract résumé text, and request match scores"
)]
struct Cli {
    /// Intermediate JSON file shared by the stages
    #[arg(long, env = "RESULTS_PATH", default_value = "results.json", global = true)]
    results: PathBuf,

    /// Append-only log of scoring results
    #[arg(long, env = "PERFORMANCE_LOG", default_value = "performance.txt", global = true)]
    log: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Query candidate submissions, normalize them, and write the results file
    Fetch,
    /// Download each record's résumé and add its text to the results file
    Enrich,
    /// Send a match request for every record in the results file
    Request,
    /// fetch, enrich and request in one go (default)
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env feeds both the clap `env` defaults and Config
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting candidate pipeline v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Fetch => {
            let database = DatabaseConfig::from_env()?;
            let count = pipeline::fetch_stage(&config, &database, &cli.results).await?;
            println!("Saved {count} record(s) to {}", cli.results.display());
        }
        Commands::Enrich => {
            let count = pipeline::enrich_stage(&config, &cli.results).await?;
            println!("Enriched {count} record(s) in {}", cli.results.display());
        }
        Commands::Request => {
            pipeline::request_stage(&config, &cli.results, &cli.log).await?;
        }
        Commands::Run => {
            let database = DatabaseConfig::from_env()?;
            pipeline::run(&config, &database, &cli.results, &cli.log).await?;
        }
    }

    Ok(())
}
