//! Integration tests for `ReviewScraper` over the HTTP backend.
//!
//! Uses `wiremock` to serve product and reviews pages locally so no real
//! network traffic is made.

use std::time::Duration;

use revsent_core::{EmptyPagePolicy, SiteProfile};
use revsent_scraper::{
    CollectSettings, HttpSource, PageSource, RetryPolicy, ReviewScraper, ScraperError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reviews_page(texts: &[&str]) -> String {
    let blocks: String = texts
        .iter()
        .map(|t| format!(r#"<div class="col"><div class="ZmyHeo"><div><div class="">{t}</div></div></div></div>"#))
        .collect();
    format!("<!doctype html><html><body>{blocks}</body></html>")
}

fn test_scraper(retry: RetryPolicy, policy: EmptyPagePolicy) -> ReviewScraper {
    let source = HttpSource::new(5, "revsent-test/0.1").expect("failed to build HttpSource");
    let settings = CollectSettings {
        max_pages: 10,
        inter_page_delay: Duration::ZERO,
        empty_page_policy: policy,
        retry,
    };
    ReviewScraper::new(Box::new(source), SiteProfile::default(), settings)
        .expect("default profile compiles")
}

fn product_url(server: &MockServer) -> String {
    format!("{}/titan-watch/p/itm123?pid=WAT1", server.uri())
}

// ---------------------------------------------------------------------------
// Reviews pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collects_reviews_across_pages_until_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/product-reviews/itm123"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(reviews_page(&[
            "Elegant and light",
            "Strap broke in a month",
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/product-reviews/itm123"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(reviews_page(&["Worth the price"])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/product-reviews/itm123"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(reviews_page(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = test_scraper(RetryPolicy::none(), EmptyPagePolicy::Stop);
    let batch = scraper
        .collect_reviews(&product_url(&server), 100)
        .await
        .expect("collection should succeed");

    let texts: Vec<&str> = batch.iter().map(|r| r.text()).collect();
    assert_eq!(
        texts,
        vec!["Elegant and light", "Strap broke in a month", "Worth the price"]
    );
}

#[tokio::test]
async fn preserves_product_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/product-reviews/itm123"))
        .and(query_param("pid", "WAT1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(reviews_page(&["ok"])))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = test_scraper(RetryPolicy::none(), EmptyPagePolicy::Stop);
    let batch = scraper
        .collect_reviews(&product_url(&server), 1)
        .await
        .unwrap();
    assert_eq!(batch.len(), 1);
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_aborts_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/product-reviews/itm123"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = test_scraper(
        RetryPolicy {
            max_retries: 3,
            backoff_base_ms: 0,
        },
        EmptyPagePolicy::Stop,
    );
    let result = scraper.collect_reviews(&product_url(&server), 10).await;
    assert!(
        matches!(result, Err(ScraperError::NotFound { .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_retried_then_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/product-reviews/itm123"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let scraper = test_scraper(
        RetryPolicy {
            max_retries: 2,
            backoff_base_ms: 0,
        },
        EmptyPagePolicy::Stop,
    );
    let result = scraper.collect_reviews(&product_url(&server), 10).await;
    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 503, .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_reports_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/product-reviews/itm123"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let scraper = test_scraper(RetryPolicy::none(), EmptyPagePolicy::Stop);
    let result = scraper.collect_reviews(&product_url(&server), 10).await;
    assert!(
        matches!(
            result,
            Err(ScraperError::RateLimited {
                retry_after_secs: 17,
                ..
            })
        ),
        "got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_metrics_reads_summary_from_product_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/titan-watch/p/itm123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><span class="Wphh3N"><span>2,041 Ratings&nbsp;&amp;</span><span>173 Reviews</span></span></body></html>"#,
        ))
        .mount(&server)
        .await;

    let scraper = test_scraper(RetryPolicy::none(), EmptyPagePolicy::Stop);
    let metrics = scraper.fetch_metrics(&product_url(&server)).await.unwrap();
    assert_eq!(metrics.ratings_count, Some(2_041));
    assert_eq!(metrics.reviews_count, Some(173));
}

#[tokio::test]
async fn http_source_reports_its_name() {
    let source = HttpSource::new(5, "revsent-test/0.1").unwrap();
    assert_eq!(source.name(), "http");
}
