use crate::extract::markup::{expect_attr, expect_class, expect_tag, MarkupNode};
use crate::extract::PageSchema;
use crate::{ExtractError, ExtractResult};
use url::Url;

/// Resolves the absolute URL of the next card in the ring
///
/// Reads the `href` of the first link inside the next-block element and
/// joins it onto `base`. Relative references are resolved; absolute ones
/// pass through unchanged.
///
/// # Examples
///
/// ```
/// use card_ring::config::MarkupSchema;
/// use card_ring::extract::{resolve_next_url, PageSchema};
/// use scraper::Html;
/// use url::Url;
///
/// let html = Html::parse_document(
///     r#"<div class="next-block"><a href="/cards/foo">Next</a></div>"#,
/// );
/// let schema = PageSchema::new(&MarkupSchema::default()).unwrap();
/// let base = Url::parse("https://example.com").unwrap();
///
/// let next = resolve_next_url(&html.root_element(), &base, &schema).unwrap();
/// assert_eq!(next.as_str(), "https://example.com/cards/foo");
/// ```
pub fn resolve_next_url<N: MarkupNode>(
    root: &N,
    base: &Url,
    schema: &PageSchema,
) -> ExtractResult<Url> {
    let next_block = expect_class(root, &schema.next_block)?;
    let link = expect_tag(&next_block, "a", schema.next_block.token())?;
    let href = expect_attr(&link, "href")?;
    resolve_href(base, href)
}

/// Joins a link reference onto a base URL
pub fn resolve_href(base: &Url, href: &str) -> ExtractResult<Url> {
    base.join(href).map_err(|source| ExtractError::InvalidUrl {
        href: href.to_string(),
        source,
    })
}

/// Scheme, host and port of a URL, with an empty path
///
/// # Examples
///
/// ```
/// use card_ring::extract::base_origin;
/// use url::Url;
///
/// let url = Url::parse("https://example.com:8443/cards/foo?x=1").unwrap();
/// assert_eq!(base_origin(&url).unwrap().as_str(), "https://example.com:8443/");
/// ```
pub fn base_origin(url: &Url) -> Result<Url, url::ParseError> {
    Url::parse(&url.origin().ascii_serialization())
}

/// Record name of a card page: the last `/`-separated segment of its URL
pub fn record_name(url: &Url) -> String {
    url.as_str()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
