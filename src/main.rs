//! Press-Mirror main entry point
//!
//! This is the command-line interface for the Press-Mirror downloader.

use anyhow::Context;
use clap::Parser;
use press_mirror::config::{load_config_with_hash, validate, Config};
use press_mirror::crawler::crawl;
use press_mirror::output::print_statistics;
use press_mirror::StopReason;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Press-Mirror: an incremental press-release mirror
///
/// Press-Mirror walks the press release listing from the newest entry,
/// saves each article as Markdown and stops at the first article that has
/// already been saved.
#[derive(Parser, Debug)]
#[command(name = "press-mirror")]
#[command(version)]
#[command(about = "An incremental press-release mirror", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Listing URL to start from (page 0)
    #[arg(long, value_name = "URL")]
    list_url: Option<String>,

    /// Output directory for Markdown documents
    #[arg(long, value_name = "DIR")]
    out_dir: Option<String>,

    /// Seconds to wait between consecutive requests
    #[arg(long, value_name = "SECS")]
    sleep: Option<f64>,

    /// Maximum number of listing pages (0 = unbounded)
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = effective_config(&cli)?;

    if cli.dry_run {
        print_config(&config);
        return Ok(());
    }

    let outcome = crawl(&config).await.context("crawl aborted")?;

    match &outcome.stop {
        StopReason::AlreadyMirrored { path, .. } => {
            println!("Stopped at already mirrored article: {}", path.display());
        }
        StopReason::Exhausted => {
            println!("Reached the last listing page.");
        }
    }
    if !cli.quiet {
        println!();
        print_statistics(&outcome.stats);
        println!("Output directory: {}", config.output.output_dir);
    }

    Ok(())
}

/// Loads the config file (if any) and applies command-line overrides
fn effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(list_url) = &cli.list_url {
        config.crawler.list_url = list_url.clone();
    }
    if let Some(out_dir) = &cli.out_dir {
        config.output.output_dir = out_dir.clone();
    }
    if let Some(sleep) = cli.sleep {
        anyhow::ensure!(
            sleep.is_finite() && sleep >= 0.0,
            "--sleep must be a non-negative number of seconds"
        );
        config.crawler.request_delay_ms = (sleep * 1000.0).round() as u64;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("press_mirror=info,warn"),
            1 => EnvFilter::new("press_mirror=debug,info"),
            2 => EnvFilter::new("press_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_config(config: &Config) {
    println!("=== Press-Mirror Dry Run ===\n");

    println!("Crawler:");
    println!("  List URL: {}", config.crawler.list_url);
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    match config.crawler.page_limit() {
        Some(limit) => println!("  Max pages: {}", limit),
        None => println!("  Max pages: unbounded"),
    }

    println!("\nFetch:");
    println!("  Max attempts: {}", config.fetch.max_attempts);
    println!("  Retry delay: {}ms", config.fetch.retry_delay_ms);
    println!("  Timeout: {}s", config.fetch.timeout_secs);

    println!("\nUser Agent: {}", config.user_agent.header_value());
    println!("Output directory: {}", config.output.output_dir);

    println!("\n✓ Configuration is valid");
}
