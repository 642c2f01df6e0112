//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured timeout
//! - GET requests for card pages (as text) and card images (as bytes)
//! - Error classification (timeouts vs. other failures)
//!
//! There is no retry logic; every failure is returned to the caller.

use crate::CrawlError;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `timeout` - Upper bound for a whole request, body included
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use card_ring::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body as text
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(CrawlError::Timeout)` - The request did not finish in time
/// * `Err(CrawlError::Http)` - Connection failure or non-success status
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, CrawlError> {
    let response = send(client, url).await?;
    response.text().await.map_err(|e| classify_error(url, e))
}

/// Fetches a resource and returns its raw body
///
/// The whole body is read before returning, so a timeout never leaves a
/// partial result behind.
pub async fn fetch_bytes(client: &Client, url: &Url) -> Result<Vec<u8>, CrawlError> {
    let response = send(client, url).await?;
    let bytes = response.bytes().await.map_err(|e| classify_error(url, e))?;
    Ok(bytes.to_vec())
}

/// Sends a GET request and rejects non-success statuses
async fn send(client: &Client, url: &Url) -> Result<Response, CrawlError> {
    client
        .get(url.as_str())
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(|e| classify_error(url, e))
}

fn classify_error(url: &Url, error: reqwest::Error) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
