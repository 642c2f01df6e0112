use crate::extract::markup::{expect_class, find_all_by_class_token, text_of, MarkupNode};
use crate::extract::PageSchema;
use crate::{ExtractError, ExtractResult};
use std::collections::BTreeMap;

/// Stat category name mapped to its values, in page order
pub type CardStats = BTreeMap<String, Vec<String>>;

/// Extracts a card's stats from its properties container
///
/// Each direct child of the stats block is one category. The category key is
/// the child's first class after dropping the conditional-invisibility class;
/// its values are the strings of the last `div` inside every property pill.
///
/// A category whose first pill carries no text maps to an empty list.
///
/// # Arguments
///
/// * `properties` - The card properties container element
/// * `schema` - Class names of the card markup
///
/// # Returns
///
/// * `Ok(CardStats)` - Category name to values
/// * `Err(ExtractError)` - The stats block, a category class, or a pill's
///   value `div` is missing
pub fn extract_card_stats<N: MarkupNode>(
    properties: &N,
    schema: &PageSchema,
) -> ExtractResult<CardStats> {
    let stats_block = expect_class(properties, &schema.stats)?;

    let mut card_stats = CardStats::new();
    for entry in stats_block.child_elements() {
        let key = stat_key(&entry, &schema.invisible_class)?;
        let values = pill_values(&entry, schema)?;
        tracing::trace!("Stat '{}': {:?}", key, values);
        card_stats.insert(key, values);
    }

    Ok(card_stats)
}

/// Category key of a stat entry: its first class that is not the invisibility marker
fn stat_key<N: MarkupNode>(entry: &N, invisible_class: &str) -> ExtractResult<String> {
    let tokens: Vec<&str> = entry
        .class_tokens()
        .into_iter()
        .filter(|class| *class != invisible_class)
        .collect();

    match tokens.as_slice() {
        [] => Err(ExtractError::MissingStatKey {
            classes: entry
                .class_tokens()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }),
        [key] => Ok(key.to_string()),
        [key, rest @ ..] => {
            tracing::warn!(
                "Stat entry has several category classes; using '{}' and ignoring {:?}",
                key,
                rest
            );
            Ok(key.to_string())
        }
    }
}

/// Values of the property pills inside one stat entry
fn pill_values<N: MarkupNode>(entry: &N, schema: &PageSchema) -> ExtractResult<Vec<String>> {
    let mut texts = Vec::new();

    for pill in find_all_by_class_token(entry, &schema.property_pill) {
        let value = pill
            .descendant_elements()
            .into_iter()
            .rfind(|node| node.tag_name() == "div")
            .ok_or_else(|| ExtractError::MissingDescendant {
                tag: "div".to_string(),
                within: schema.property_pill.token().to_string(),
            })?;
        texts.push(text_of(&value));
    }

    // Pills present in the markup but left empty stand for "no value"
    if matches!(texts.first(), Some(None)) {
        return Ok(Vec::new());
    }

    Ok(texts.into_iter().flatten().collect())
}
