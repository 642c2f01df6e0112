//! Crawler module for walking a ring of card pages
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching with a fixed timeout and no retries
//! - Card image download
//! - The crawl loop that follows "next" links back to the starting page

mod coordinator;
mod fetcher;
mod images;

pub use coordinator::{run_crawl, CrawlReport, Crawler};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page};
pub use images::{image_path, save_card_image};
