//! Trailhead main entry point
//!
//! This is the command-line interface for the Trailhead recursive crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use trailhead::config::{load_input, process_input, process_standby_input, ProcessedInput};
use trailhead::crawler::crawl;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Trailhead: a configurable recursive web crawler
///
/// Trailhead reads a crawl input (JSON or TOML), validates it, and follows
/// links from the start URL within the configured depth, page budget and
/// include/exclude patterns. The crawl report is printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "trailhead")]
#[command(version)]
#[command(about = "A configurable recursive web crawler", long_about = None)]
struct Cli {
    /// Path to the crawl input file (.json or .toml)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the input and print the derived settings without crawling
    #[arg(long)]
    dry_run: bool,

    /// Prepare settings for standby mode, where the query may be absent
    #[arg(long, requires = "dry_run")]
    standby: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Installed before the input is read so normalization warnings are visible
    let log_handle = setup_logging(cli.verbose, cli.quiet);

    let raw = load_input(&cli.input)
        .with_context(|| format!("Failed to load input from {}", cli.input.display()))?;

    let processed = if cli.standby {
        process_standby_input(&raw)
    } else {
        process_input(&raw)
    }
    .context("Invalid crawl input")?;

    let debug_level = debug_mode_verbosity(cli.verbose, cli.quiet, processed.options.debug_mode);
    if let Some(level) = debug_level {
        if let Err(e) = log_handle.reload(EnvFilter::new(filter_directives(level, false))) {
            tracing::warn!("Failed to raise log level for debug mode: {}", e);
        }
    }
    tracing::info!("Input loaded from: {}", cli.input.display());

    if cli.dry_run {
        return handle_dry_run(&processed);
    }

    handle_crawl(processed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// The returned handle swaps the filter once the input's `debugMode` is known.
fn setup_logging(verbose: u8, quiet: bool) -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(filter_directives(verbose, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_writer(std::io::stderr),
        )
        .init();

    handle
}

/// Filter directives for a verbosity level
fn filter_directives(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        // Only show errors
        return "error";
    }

    match verbose {
        0 => "trailhead=info,warn",
        1 => "trailhead=debug,info",
        2 => "trailhead=trace,debug",
        _ => "trace",
    }
}

/// Verbosity to switch to when `debugMode` is set, if it raises the current one
fn debug_mode_verbosity(verbose: u8, quiet: bool, debug_mode: bool) -> Option<u8> {
    (debug_mode && !quiet && verbose == 0).then_some(1)
}

/// Handles the --dry-run mode: prints the derived settings
fn handle_dry_run(processed: &ProcessedInput) -> anyhow::Result<()> {
    let rendered =
        serde_json::to_string_pretty(processed).context("Failed to serialize settings")?;
    println!("{}", rendered);
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(processed: ProcessedInput) -> anyhow::Result<()> {
    let options = processed.options;
    tracing::info!(
        "Recursive crawling: {}, patterns: include '{}', exclude '{}'",
        options.enable_recursive_crawling,
        options.include_patterns,
        options.exclude_patterns
    );

    let report = match crawl(options).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let rendered = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", rendered);

    Ok(())
}
