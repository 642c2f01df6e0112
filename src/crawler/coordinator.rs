//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that walks a ring of card pages:
//! - Fetching each page in turn
//! - Downloading the card image and extracting card data, as configured
//! - Following the "next" link until it leads back to the starting page
//!
//! The loop is strictly sequential; every request completes before the next
//! one is sent.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::images::save_card_image;
use crate::extract::{
    base_origin, extract_card_data, locate_card_image, record_name, resolve_next_url,
    CardRecord, PageSchema,
};
use crate::{ConfigError, CrawlError, ExtractError, ExtractResult};
use reqwest::Client;
use scraper::Html;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Outcome of a completed crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Card records keyed by record name (empty unless data collection is on)
    pub records: BTreeMap<String, CardRecord>,

    /// Number of pages fetched
    pub pages_visited: usize,

    /// Number of card images written to disk
    pub images_saved: usize,

    /// Number of card images that could not be fetched or written
    pub images_failed: usize,
}

/// Everything needed from one page, extracted before any further request
struct PageExtraction {
    image: Option<ExtractResult<Url>>,
    data: Option<ExtractResult<CardRecord>>,
    next: ExtractResult<Url>,
}

/// Main crawler structure
pub struct Crawler {
    config: Config,
    schema: PageSchema,
    client: Client,
    start: Url,
    base: Url,
    download_dir: PathBuf,
}

impl Crawler {
    /// Creates a new crawler instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(CrawlError)` - The configuration is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        validate(&config)?;

        let start = Url::parse(&config.crawler.starting_url)?;
        let base = base_origin(&start)?;
        let schema = PageSchema::new(&config.schema)
            .map_err(|e| ConfigError::Validation(format!("Invalid markup schema: {}", e)))?;
        let client = build_http_client(Duration::from_secs(config.crawler.timeout_secs))?;
        let download_dir = PathBuf::from(&config.output.download_dir);

        Ok(Self {
            config,
            schema,
            client,
            start,
            base,
            download_dir,
        })
    }

    /// Replaces the HTTP client, e.g. to use a shorter timeout
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Runs the crawl loop until the ring closes
    ///
    /// Each iteration:
    /// 1. Derives the record name from the current URL
    /// 2. Fetches and parses the page
    /// 3. Downloads the card image (if enabled)
    /// 4. Extracts the card data (if enabled)
    /// 5. Resolves the next URL; stops when it is the starting URL
    ///
    /// Any page fetch or markup error aborts the crawl. Images already written
    /// stay on disk.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The ring closed
    /// * `Err(CrawlError::RingNotClosed)` - `max_pages` pages were visited
    ///   without returning to the start
    /// * `Err(CrawlError::Revisited)` - The chain looped back to a page other
    ///   than the start
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        let crawler_config = &self.config.crawler;
        let max_pages = crawler_config.max_pages as usize;

        tracing::info!(
            "Starting crawl at {} (images: {}, data: {})",
            self.start,
            crawler_config.download_images,
            crawler_config.collect_data
        );

        let mut report = CrawlReport::default();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut current = self.start.clone();
        let start_time = std::time::Instant::now();

        loop {
            if report.pages_visited >= max_pages {
                return Err(CrawlError::RingNotClosed {
                    start: self.start.to_string(),
                    pages: report.pages_visited,
                });
            }

            let name = record_name(&current);
            tracing::info!("Processing card '{}': {}", name, current);

            let body = fetch_page(&self.client, &current).await?;
            report.pages_visited += 1;
            visited.insert(current.clone());

            let page = self.extract_page(&body);

            if let Some(image) = page.image {
                let image_url = image.map_err(|source| extract_error(&current, source))?;
                if save_card_image(&self.client, &image_url, &self.download_dir, &name).await {
                    report.images_saved += 1;
                } else {
                    report.images_failed += 1;
                }
            }

            if let Some(data) = page.data {
                let record = data.map_err(|source| extract_error(&current, source))?;
                tracing::debug!("Card '{}' has {} stat categories", name, record.card_stats.len());
                report.records.insert(name, record);
            }

            let next = page.next.map_err(|source| extract_error(&current, source))?;

            if next == self.start {
                tracing::info!(
                    "Ring closed after {} pages in {:?}",
                    report.pages_visited,
                    start_time.elapsed()
                );
                break;
            }

            if visited.contains(&next) {
                return Err(CrawlError::Revisited {
                    url: next.to_string(),
                    start: self.start.to_string(),
                });
            }

            tracing::debug!("Next card: {}", next);
            current = next;
        }

        Ok(report)
    }

    /// Parses a page and runs every enabled extraction
    ///
    /// The parsed document is dropped before returning, so nothing borrowed
    /// from it lives across an await point.
    fn extract_page(&self, body: &str) -> PageExtraction {
        let document = Html::parse_document(body);
        let root = document.root_element();
        let crawler_config = &self.config.crawler;

        PageExtraction {
            image: crawler_config
                .download_images
                .then(|| locate_card_image(&root, &self.base, &self.schema)),
            data: crawler_config
                .collect_data
                .then(|| extract_card_data(&root, &self.schema)),
            next: resolve_next_url(&root, &self.base, &self.schema),
        }
    }

    /// The starting URL, which is also the termination sentinel
    pub fn start_url(&self) -> &Url {
        &self.start
    }

    /// Directory card images are written into
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }
}

fn extract_error(url: &Url, source: ExtractError) -> CrawlError {
    CrawlError::Extract {
        url: url.to_string(),
        source,
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use card_ring::config::Config;
/// use card_ring::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.crawler.collect_data = true;
/// let report = run_crawl(config).await?;
/// println!("Collected {} cards", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, CrawlError> {
    let crawler = Crawler::new(config)?;
    crawler.run().await
}
