use crate::extract::markup::{expect_attr, expect_class, expect_tag, MarkupNode};
use crate::extract::next::resolve_href;
use crate::extract::PageSchema;
use crate::ExtractResult;
use url::Url;

/// Locates the URL of the card image
///
/// The image is the `img` inside the first link of the image-column element.
/// Its `src` is joined onto `base`, so both absolute and relative sources work.
pub fn locate_card_image<N: MarkupNode>(
    root: &N,
    base: &Url,
    schema: &PageSchema,
) -> ExtractResult<Url> {
    let column = expect_class(root, &schema.image_column)?;
    let link = expect_tag(&column, "a", schema.image_column.token())?;
    let image = expect_tag(&link, "img", "a")?;
    let src = expect_attr(&image, "src")?;
    resolve_href(base, src)
}
