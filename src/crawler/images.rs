//! Card image download

use crate::crawler::fetcher::fetch_bytes;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// Path a card image is saved under: `<dir>/<name>.jpg`
pub fn image_path(download_dir: &Path, name: &str) -> PathBuf {
    download_dir.join(format!("{}.jpg", name))
}

/// Downloads a card image and writes it to `<download_dir>/<name>.jpg`
///
/// Failures never abort the crawl: a failed request (timeout, connection
/// error, error status) or a failed write (missing directory, permissions)
/// is logged and reported as `false`. The body is fully downloaded before the
/// file is opened, so a failed request leaves no file behind.
///
/// # Returns
///
/// * `true` - The image was written
/// * `false` - The image could not be fetched or saved
pub async fn save_card_image(
    client: &Client,
    image_url: &Url,
    download_dir: &Path,
    name: &str,
) -> bool {
    let bytes = match fetch_bytes(client, image_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                "Failed while retrieving picture for {} from {}: {}",
                name,
                image_url,
                e
            );
            return false;
        }
    };

    let path = image_path(download_dir, name);
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        tracing::warn!(
            "Failed while saving picture for {} from {} to {}: {}",
            name,
            image_url,
            path.display(),
            e
        );
        return false;
    }

    tracing::debug!("Saved {} bytes to {}", bytes.len(), path.display());
    true
}
