//! Extraction of card data from parsed pages
//!
//! This module turns a card detail page into:
//! - the URL of the card image
//! - the card's stats, as category name to list of values
//! - the absolute URL of the next card in the ring
//!
//! All lookups go through class names from a [`MarkupSchema`], matched as
//! whole class tokens.

mod image;
mod markup;
mod matcher;
mod next;
mod stats;

pub use image::locate_card_image;
pub use markup::{
    expect_attr, expect_class, expect_tag, find_all_by_class_token, find_by_class_token,
    first_descendant_tag, text_of, MarkupNode,
};
pub use matcher::ClassMatcher;
pub use next::{base_origin, record_name, resolve_href, resolve_next_url};
pub use stats::{extract_card_stats, CardStats};

use crate::config::MarkupSchema;
use crate::ExtractResult;
use serde::{Deserialize, Serialize};

/// Data collected for one card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "card-stats")]
    pub card_stats: CardStats,
}

/// Compiled class matchers for the card markup
#[derive(Debug, Clone)]
pub struct PageSchema {
    pub image_column: ClassMatcher,
    pub properties_container: ClassMatcher,
    pub stats: ClassMatcher,
    pub property_pill: ClassMatcher,
    pub next_block: ClassMatcher,
    /// Compared token by token, never searched for
    pub invisible_class: String,
}

impl PageSchema {
    /// Compiles the matchers for every class name in the schema
    pub fn new(schema: &MarkupSchema) -> ExtractResult<Self> {
        Ok(Self {
            image_column: ClassMatcher::new(&schema.image_column)?,
            properties_container: ClassMatcher::new(&schema.properties_container)?,
            stats: ClassMatcher::new(&schema.stats)?,
            property_pill: ClassMatcher::new(&schema.property_pill)?,
            next_block: ClassMatcher::new(&schema.next_block)?,
            invisible_class: schema.invisible_class.clone(),
        })
    }
}

/// Extracts the card record from a whole page
///
/// # Returns
///
/// * `Ok(CardRecord)` - The card's stats
/// * `Err(ExtractError)` - The properties container or stats markup is missing
pub fn extract_card_data<N: MarkupNode>(root: &N, schema: &PageSchema) -> ExtractResult<CardRecord> {
    let properties = expect_class(root, &schema.properties_container)?;

    Ok(CardRecord {
        card_stats: extract_card_stats(&properties, schema)?,
    })
}
