//! Aozora Collector main entry point
//!
//! This is the command-line interface for the catalog collector.

use anyhow::Context;
use aozora_collector::config::{load_config_or_default, validate, Config};
use aozora_collector::output::{print_statistics, write_entry_list, write_outcome, OutputMode};
use aozora_collector::Pipeline;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Aozora Collector: extract plain text from catalog works
///
/// Discovers the works listed on a catalog index page, resolves each work's
/// author and archive, downloads the archive and prints the plain text it
/// contains.
#[derive(Parser, Debug)]
#[command(name = "aozora-collector")]
#[command(version)]
#[command(about = "Collects plain-text works from a catalog index page", long_about = None)]
struct Cli {
    /// Catalog index page (defaults to the configured index URL)
    #[arg(value_name = "INDEX_URL")]
    index_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Request timeout in seconds, overriding the configuration
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// List discovered entries without downloading archives
    #[arg(long, conflicts_with = "metadata_only")]
    dry_run: bool,

    /// Print entry metadata but not the extracted text
    #[arg(long)]
    metadata_only: bool,

    /// Do not print run statistics at the end
    #[arg(long)]
    no_stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let index_url = cli
        .index_url
        .clone()
        .unwrap_or_else(|| config.catalog.index_url.clone());

    let pipeline = Pipeline::from_config(config).context("Failed to build HTTP client")?;

    if cli.dry_run {
        return handle_dry_run(&pipeline, &index_url).await;
    }

    let stop = pipeline.stop_handle();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if stop.stop() {
                tracing::warn!("Interrupt received, finishing current entry (press Ctrl-C again to quit)");
            } else {
                tracing::warn!("Second interrupt received, exiting");
                std::process::exit(130);
            }
        }
    });

    let mode = if cli.metadata_only {
        OutputMode::MetadataOnly
    } else {
        OutputMode::Full
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;

    let summary = pipeline
        .run(&index_url, |outcome| {
            if write_error.is_some() {
                return;
            }
            if let Err(e) = write_outcome(&mut out, &outcome, mode) {
                write_error = Some(e);
            }
        })
        .await
        .with_context(|| format!("Collection from {} failed", index_url))?;

    if let Some(e) = write_error {
        return Err(e).context("Failed to write output");
    }
    out.flush()?;
    drop(out);

    tracing::info!(
        "Run finished: {} of {} entries extracted",
        summary.extracted,
        summary.discovered
    );

    if !cli.no_stats && !cli.quiet {
        println!();
        print_statistics(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the collected text.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("aozora_collector=info,warn"),
            1 => EnvFilter::new("aozora_collector=debug,info"),
            2 => EnvFilter::new("aozora_collector=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (or defaults) and applies CLI overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(index_url) = &cli.index_url {
        config.catalog.index_url = index_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: discovers and lists entries only
async fn handle_dry_run(
    pipeline: &Pipeline<aozora_collector::HttpFetcher>,
    index_url: &str,
) -> anyhow::Result<()> {
    let entries = pipeline
        .discover(index_url)
        .await
        .with_context(|| format!("Discovery from {} failed", index_url))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_entry_list(&mut out, &entries)?;
    writeln!(out)?;
    writeln!(
        out,
        "✓ {} entries discovered, {} with an archive",
        entries.len(),
        entries
            .iter()
            .filter(|e| e.archive_location().is_some())
            .count()
    )?;

    Ok(())
}
