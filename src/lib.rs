//! card-ring: a crawler for rings of trading-card pages
//!
//! This crate follows the "next" link of card detail pages until the chain
//! returns to its starting page, extracting each card's stats and optionally
//! downloading its image along the way.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;

use thiserror::Error;

/// Main error type for card-ring operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Extraction failed for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("Ring starting at {start} did not close after {pages} pages")]
    RingNotClosed { start: String, pages: usize },

    #[error("Next link revisits {url} before returning to {start}")]
    Revisited { url: String, start: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised when a page does not have the expected markup shape
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No element with class '{class}'")]
    MissingElement { class: String },

    #[error("No <{tag}> inside element '{within}'")]
    MissingDescendant { tag: String, within: String },

    #[error("<{tag}> has no '{attr}' attribute")]
    MissingAttribute { attr: String, tag: String },

    #[error("Stat entry has no category class (classes: {classes:?})")]
    MissingStatKey { classes: Vec<String> },

    #[error("Cannot resolve '{href}': {source}")]
    InvalidUrl {
        href: String,
        source: ::url::ParseError,
    },

    #[error("Invalid class pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for card-ring operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for markup extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler};
pub use extract::{CardRecord, CardStats};
