//! Configuration module for card-ring
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a crawl can also run from command-line flags alone.
//!
//! # Example
//!
//! ```no_run
//! use card_ring::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("card-ring.toml")).unwrap();
//! println!("Crawler will start at: {}", config.crawler.starting_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, MarkupSchema, OutputConfig, DEFAULT_STARTING_URL};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
