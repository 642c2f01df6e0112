use serde::Deserialize;

/// Card page the crawl starts from when none is given
pub const DEFAULT_STARTING_URL: &str = "https://www.worldofdoomlings.com/cards/echolocation";

/// Main configuration structure for card-ring
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub schema: MarkupSchema,
}

/// Crawl loop behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlerConfig {
    /// First page of the ring; the crawl stops when "next" leads back here
    pub starting_url: String,

    /// Download each card's image into the download directory
    pub download_images: bool,

    /// Extract each card's stats into the report
    pub collect_data: bool,

    /// Upper bound on pages visited before the ring is declared broken
    pub max_pages: u32,

    /// Timeout for page and image requests (seconds)
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            starting_url: DEFAULT_STARTING_URL.to_string(),
            download_images: false,
            collect_data: false,
            max_pages: 1000,
            timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Directory card images are written into as `<name>.jpg`
    pub download_dir: String,

    /// Where collected card data is written as JSON (stdout if unset)
    pub data_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_dir: "./images".to_string(),
            data_path: None,
        }
    }
}

/// Class names the card pages use to mark up their parts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MarkupSchema {
    /// Block holding the linked card image
    pub image_column: String,

    /// Block holding all card properties
    pub properties_container: String,

    /// Block whose children are the stat categories
    pub stats: String,

    /// Single value inside a stat category
    pub property_pill: String,

    /// Block holding the link to the next card
    pub next_block: String,

    /// Class the site adds to conditionally hidden elements
    pub invisible_class: String,
}

impl Default for MarkupSchema {
    fn default() -> Self {
        Self {
            image_column: "card-image-column".to_string(),
            properties_container: "card-properties-container".to_string(),
            stats: "card-stats".to_string(),
            property_pill: "property-pill".to_string(),
            next_block: "next-block".to_string(),
            invisible_class: "w-condition-invisible".to_string(),
        }
    }
}

impl MarkupSchema {
    /// All class names paired with their config key, for validation
    pub(crate) fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("image-column", self.image_column.as_str()),
            ("properties-container", self.properties_container.as_str()),
            ("stats", self.stats.as_str()),
            ("property-pill", self.property_pill.as_str()),
            ("next-block", self.next_block.as_str()),
            ("invisible-class", self.invisible_class.as_str()),
        ]
    }
}
