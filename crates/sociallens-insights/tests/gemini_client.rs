//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use sociallens_core::Metrics;
use sociallens_insights::{GeminiClient, InsightError, InsightGenerator};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", "gemini-2.0-flash", 5, base_url)
        .expect("client construction should not fail")
}

fn metrics() -> Metrics {
    Metrics {
        total_posts: 10,
        total_engagement: 5_000,
        ..Metrics::default()
    }
}

#[tokio::test]
async fn generate_returns_parsed_insights() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{
                    "text": "1. Instagram drives most of the engagement for Acme\n2. Respond faster to negative posts on X\n"
                }]
            },
            "finishReason": "STOP"
        }]
    });

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": { "topK": 40, "maxOutputTokens": 1024 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let insights = test_client(&server.uri())
        .generate("Acme", &[], &metrics())
        .await
        .expect("should parse insights");

    assert_eq!(
        insights,
        vec![
            "• Instagram drives most of the engagement for Acme.",
            "• Respond faster to negative posts on X.",
        ]
    );
}

#[tokio::test]
async fn generate_surfaces_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate("Acme", &[], &metrics())
        .await
        .expect_err("429 should fail");

    assert!(
        matches!(err, InsightError::Status { status: 429, ref body } if body == "quota exhausted"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn generate_reports_blocked_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate("Acme", &[], &metrics())
        .await
        .expect_err("blocked prompt should fail");

    assert!(matches!(err, InsightError::EmptyResponse(_)));
}

#[tokio::test]
async fn generate_may_return_empty_list_for_short_answers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "OK." }] } }]
        })))
        .mount(&server)
        .await;

    let insights = test_client(&server.uri())
        .generate("Acme", &[], &metrics())
        .await
        .expect("short answers are not errors");

    assert!(insights.is_empty());
}
