use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing::{error, info};

use friction_generator::{Catalog, GeneratorConfig};
use friction_loader::config::connect;
use friction_loader::{run, ConsoleReporter, Loader, Settings};

#[derive(Parser)]
#[command(name = "friction-loader")]
#[command(
    about = "Generate synthetic e-commerce friction telemetry and load it into OpenSearch",
    long_about = None
)]
struct Cli {
    /// OpenSearch URL (overrides OPENSEARCH_URL)
    #[arg(long)]
    opensearch_url: Option<String>,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Generate the dataset and print its summary without contacting the store
    #[arg(long)]
    generate_only: bool,

    /// Skip the per-index count after loading
    #[arg(long)]
    skip_verify: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = execute(cli).await {
        error!(error = %err, "Run failed");
        eprintln!("\n{} {}", "✗ Error:".red().bold(), err);
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let reporter = ConsoleReporter::new();

    // Settings are checked before any work so a bad config fails fast.
    let settings = if cli.generate_only {
        None
    } else {
        Some(Settings::from_env(cli.opensearch_url.clone())?)
    };

    let catalog = Catalog::storefront();
    let dataset = run::generate(&catalog, GeneratorConfig::default(), cli.seed, &reporter);

    let Some(settings) = settings else {
        info!("Generate-only run, skipping ingestion");
        return Ok(());
    };

    reporter.banner("Ingesting data to OpenSearch");
    reporter.connecting(&settings.store.redacted_url());
    let store = connect(&settings.store).await?;
    reporter.connected();

    let loader = Loader::new(Arc::new(store));
    run::ingest(&loader, &dataset, !cli.skip_verify, &reporter).await?;

    reporter.complete();
    reporter.example_queries();
    Ok(())
}
