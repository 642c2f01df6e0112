//! Integration tests for the crawler
//!
//! These tests use wiremock to serve rings of card pages and exercise the
//! full crawl loop end-to-end.

use card_ring::config::Config;
use card_ring::crawler::{build_http_client, image_path, save_card_image, Crawler};
use card_ring::{CrawlError, ExtractError};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Builds a card page with an image, a stats block and a next link
fn card_page(image_src: &str, color: &str, next_href: &str) -> String {
    format!(
        r#"<html><head><title>Card</title></head><body>
        <div class="w-row">
          <div class="w-col card-image-column"><a href="{image_src}"><img src="{image_src}" alt="card"></a></div>
          <div class="w-col card-properties-container">
            <div class="card-stats">
              <div class="color"><div class="property-pill"><div class="pill-icon"></div><div>{color}</div></div></div>
              <div class="effects w-condition-invisible"><div class="property-pill"><div class="pill-icon"></div><div></div></div></div>
            </div>
          </div>
        </div>
        <div class="next-block"><a href="{next_href}">Next card</a></div>
        </body></html>"#
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Creates a test configuration starting at `/cards/<start>` on the mock server
fn create_test_config(base_url: &str, start: &str, download_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.crawler.starting_url = format!("{}/cards/{}", base_url, start);
    config.crawler.timeout_secs = 1;
    config.output.download_dir = download_dir.path().to_string_lossy().to_string();
    config
}

/// Mounts the ring alpha -> beta -> gamma -> alpha, each page served exactly once
async fn mount_three_card_ring(server: &MockServer) {
    let base_url = server.uri();
    let cards = [
        ("alpha", "Red", "/cards/beta".to_string()),
        ("beta", "Green", "/cards/gamma".to_string()),
        // Absolute link back to the start
        ("gamma", "Blue", format!("{}/cards/alpha", base_url)),
    ];

    for (name, color, next_href) in cards {
        Mock::given(method("GET"))
            .and(path(format!("/cards/{}", name)))
            .respond_with(html_response(card_page(
                &format!("{}/images/{}.jpg", base_url, name),
                color,
                &next_href,
            )))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_ring_of_three_collects_every_card() {
    let mock_server = MockServer::start().await;
    mount_three_card_ring(&mock_server).await;

    Mock::given(method("GET"))
        .and(path_regex("^/images/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let download_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), "alpha", &download_dir);
    config.crawler.collect_data = true;

    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let report = crawler.run().await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.records.len(), 3);
    assert_eq!(
        report.records.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["alpha", "beta", "gamma"]
    );
    assert_eq!(report.records["alpha"].card_stats["color"], vec!["Red"]);
    assert_eq!(report.records["beta"].card_stats["color"], vec!["Green"]);
    assert_eq!(report.records["gamma"].card_stats["color"], vec!["Blue"]);
    assert!(report.records["gamma"].card_stats["effects"].is_empty());
    assert_eq!(report.images_saved, 0);

    // Wiremock verifies the expect(1) / expect(0) counts when the server drops
}

#[tokio::test]
async fn test_images_downloaded_for_each_card() {
    let mock_server = MockServer::start().await;
    mount_three_card_ring(&mock_server).await;

    for name in ["alpha", "beta", "gamma"] {
        Mock::given(method("GET"))
            .and(path(format!("/images/{}.jpg", name)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(format!("jpeg:{}", name).into_bytes())
                    .insert_header("content-type", "image/jpeg"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let download_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), "alpha", &download_dir);
    config.crawler.download_images = true;

    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let report = crawler.run().await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.images_saved, 3);
    assert_eq!(report.images_failed, 0);
    assert!(report.records.is_empty());

    for name in ["alpha", "beta", "gamma"] {
        let saved = std::fs::read(download_dir.path().join(format!("{}.jpg", name)))
            .expect("Image was not written");
        assert_eq!(saved, format!("jpeg:{}", name).into_bytes());
    }
}

#[tokio::test]
async fn test_image_failure_does_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // A ring of one: the page links back to itself
    Mock::given(method("GET"))
        .and(path("/cards/solo"))
        .respond_with(html_response(card_page(
            "/images/solo.jpg",
            "Purple",
            "/cards/solo",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/images/solo.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let download_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, "solo", &download_dir);
    config.crawler.download_images = true;
    config.crawler.collect_data = true;

    let report = Crawler::new(config).unwrap().run().await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.images_saved, 0);
    assert_eq!(report.images_failed, 1);
    assert_eq!(report.records["solo"].card_stats["color"], vec!["Purple"]);
    assert!(!download_dir.path().join("solo.jpg").exists());
}

#[tokio::test]
async fn test_image_timeout_returns_false() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/slow.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF])
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(Duration::from_millis(200)).unwrap();
    let image_url = Url::parse(&format!("{}/images/slow.jpg", mock_server.uri())).unwrap();
    let download_dir = TempDir::new().unwrap();

    let saved = save_card_image(&client, &image_url, download_dir.path(), "slow").await;

    assert!(!saved);
    assert!(!image_path(download_dir.path(), "slow").exists());
}

#[tokio::test]
async fn test_image_write_failure_returns_false() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/card.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(Duration::from_secs(2)).unwrap();
    let image_url = Url::parse(&format!("{}/images/card.jpg", mock_server.uri())).unwrap();
    let download_dir = TempDir::new().unwrap();
    let missing_dir = download_dir.path().join("does-not-exist");

    let saved = save_card_image(&client, &image_url, &missing_dir, "card").await;

    assert!(!saved);
    assert!(!missing_dir.exists());
}

#[tokio::test]
async fn test_chain_that_never_closes_hits_page_cap() {
    let mock_server = MockServer::start().await;

    // Every numbered page links to the following number, forever
    Mock::given(method("GET"))
        .and(path_regex(r"^/cards/\d+$"))
        .respond_with(|request: &Request| {
            let current: u32 = request
                .url
                .path()
                .rsplit('/')
                .next()
                .and_then(|n| n.parse().ok())
                .unwrap_or(0);
            html_response(card_page(
                "/images/x.jpg",
                "Grey",
                &format!("/cards/{}", current + 1),
            ))
        })
        .expect(5)
        .mount(&mock_server)
        .await;

    let download_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), "0", &download_dir);
    config.crawler.max_pages = 5;

    let result = Crawler::new(config).unwrap().run().await;

    assert!(
        matches!(result, Err(CrawlError::RingNotClosed { pages: 5, .. })),
        "unexpected result: {:?}",
        result
    );
}

#[tokio::test]
async fn test_loop_that_skips_the_start_is_reported() {
    let mock_server = MockServer::start().await;

    // alpha -> beta -> gamma -> beta
    for (name, next) in [("alpha", "beta"), ("beta", "gamma"), ("gamma", "beta")] {
        Mock::given(method("GET"))
            .and(path(format!("/cards/{}", name)))
            .respond_with(html_response(card_page(
                "/images/x.jpg",
                "Grey",
                &format!("/cards/{}", next),
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let download_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), "alpha", &download_dir);

    let result = Crawler::new(config).unwrap().run().await;

    match result {
        Err(CrawlError::Revisited { url, .. }) => assert!(url.ends_with("/cards/beta")),
        other => panic!("expected Revisited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dead_link_aborts_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/alpha"))
        .respond_with(html_response(card_page(
            "/images/alpha.jpg",
            "Red",
            "/cards/missing",
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let download_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), "alpha", &download_dir);
    config.crawler.collect_data = true;

    let result = Crawler::new(config).unwrap().run().await;

    match result {
        Err(CrawlError::Http { url, .. }) => assert!(url.ends_with("/cards/missing")),
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_page_timeout_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/alpha"))
        .respond_with(
            html_response(card_page("/images/alpha.jpg", "Red", "/cards/alpha"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let download_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), "alpha", &download_dir);

    let result = Crawler::new(config).unwrap().run().await;

    assert!(matches!(result, Err(CrawlError::Timeout { .. })));
}

#[tokio::test]
async fn test_missing_markup_aborts_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/alpha"))
        .respond_with(html_response(
            "<html><body><p>Maintenance</p></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    let download_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), "alpha", &download_dir);

    let result = Crawler::new(config).unwrap().run().await;

    assert!(matches!(
        result,
        Err(CrawlError::Extract {
            source: ExtractError::MissingElement { .. },
            ..
        })
    ));
}

#[tokio::test]
async fn test_with_client_override() {
    let mock_server = MockServer::start().await;
    mount_three_card_ring(&mock_server).await;

    let download_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), "alpha", &download_dir);
    let client = build_http_client(Duration::from_secs(5)).unwrap();

    let report = Crawler::new(config)
        .unwrap()
        .with_client(client)
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_visited, 3);
    assert!(report.records.is_empty());
}
