//! Output module for crawl results
//!
//! This module handles:
//! - Exporting collected card records as JSON
//! - Printing a summary of a finished crawl

mod json;
mod summary;

pub use json::{save_records, write_records};
pub use summary::print_summary;
