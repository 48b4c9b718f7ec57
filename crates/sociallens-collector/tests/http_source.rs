//! Integration tests for `HttpSource` using wiremock HTTP mocks.

use sociallens_collector::{CollectorError, DataSource, HttpSource};
use sociallens_core::Sentiment;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_source(base_url: &str) -> HttpSource {
    HttpSource::new(base_url, 5).expect("source construction should not fail")
}

#[tokio::test]
async fn collect_returns_parsed_posts() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "platform": "Instagram",
            "date": "2025-03-01 10:00:00",
            "content": "Loving the new Acme rocket skates",
            "engagement": { "likes": 1200, "comments": 45, "shares": 30 },
            "sentiment": "positive",
            "url": "https://instagram.example.com/p/1"
        },
        {
            "platform": "X",
            "date": "2025-03-02 11:30:00",
            "content": "Acme anvils arrived broken again",
            "engagement": { "likes": 80, "comments": 12, "shares": 4 },
            "sentiment": "negative",
            "url": "https://x.example.com/status/2"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("brand", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let posts = test_source(&server.uri())
        .collect("Acme")
        .await
        .expect("should parse posts");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].platform, "Instagram");
    assert_eq!(posts[0].engagement.total(), Some(1275));
    assert_eq!(posts[1].sentiment, Sentiment::Negative);
}

#[tokio::test]
async fn collect_maps_404_to_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let posts = test_source(&server.uri())
        .collect("Unknown Co")
        .await
        .expect("404 is not an error");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn collect_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_source(&server.uri())
        .collect("Acme")
        .await
        .expect_err("503 should fail");
    assert!(matches!(err, CollectorError::Status { status: 503, .. }));
}

#[tokio::test]
async fn collect_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_source(&server.uri())
        .collect("Acme")
        .await
        .expect_err("non-JSON body should fail");
    assert!(matches!(err, CollectorError::Http(_)));
}
