//! card-ring main entry point
//!
//! This is the command-line interface for the card-ring crawler.

use anyhow::Context;
use card_ring::config::{load_config, validate, Config};
use card_ring::crawler::Crawler;
use card_ring::output::{print_summary, save_records, write_records};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// card-ring: walks a ring of trading-card pages
///
/// Starting from one card page, card-ring follows each page's "next" link
/// until it arrives back at the start, optionally downloading every card
/// image and collecting every card's stats along the way.
#[derive(Parser, Debug)]
#[command(name = "card-ring")]
#[command(version)]
#[command(about = "Scrapes card data from a ring of card pages", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// URL to begin the crawl at
    #[arg(long, visible_alias = "url", value_name = "URL")]
    starting_url: Option<String>,

    /// Download each card's image
    #[arg(short, long)]
    images: bool,

    /// Collect each card's stats
    #[arg(short, long)]
    data: bool,

    /// Directory to write card images into
    #[arg(long, value_name = "DIR")]
    download_dir: Option<String>,

    /// Give up after this many pages if the ring has not closed
    #[arg(long)]
    max_pages: Option<u32>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write collected card data to this JSON file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of a loaded configuration
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.starting_url {
            config.crawler.starting_url = url.clone();
        }
        if self.images {
            config.crawler.download_images = true;
        }
        if self.data {
            config.crawler.collect_data = true;
        }
        if let Some(dir) = &self.download_dir {
            config.output.download_dir = dir.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(timeout) = self.timeout_secs {
            config.crawler.timeout_secs = timeout;
        }
        if let Some(output) = &self.output {
            config.output.data_path = Some(output.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    if let Err(e) = handle_crawl(config, cli.quiet).await {
        tracing::error!("Crawl failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("card_ring=info,warn"),
            1 => EnvFilter::new("card_ring=debug,info"),
            2 => EnvFilter::new("card_ring=trace,debug"),
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

/// Loads the config file (if any), applies flags and validates the result
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("reading config file {}", path.display()))?
        }
        None => Config::default(),
    };

    cli.apply(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, quiet: bool) -> anyhow::Result<()> {
    if config.crawler.download_images {
        let dir = Path::new(&config.output.download_dir);
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating download directory {}", dir.display()))?;
        tracing::info!("Saving card images to {}", dir.display());
    }

    let collect_data = config.crawler.collect_data;
    let data_path = config.output.data_path.clone();

    let crawler = Crawler::new(config)?;
    let report = crawler.run().await?;

    if collect_data {
        match &data_path {
            Some(path) => {
                save_records(&report.records, Path::new(path))
                    .with_context(|| format!("writing card data to {}", path))?;
                tracing::info!("Card data written to {}", path);
            }
            None => write_records(&report.records, std::io::stdout().lock())?,
        }
    }

    if !quiet {
        // Keep stdout clean for the JSON records
        if collect_data && data_path.is_none() {
            tracing::info!(
                "Visited {} pages, saved {} images",
                report.pages_visited,
                report.images_saved
            );
        } else {
            print_summary(&report);
        }
    }

    Ok(())
}
