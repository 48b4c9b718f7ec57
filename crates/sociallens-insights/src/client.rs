//! HTTP client for the Gemini `generateContent` REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use sociallens_core::{Metrics, SocialPost};

use crate::error::InsightError;
use crate::parse::parse_insights;
use crate::prompt::build_analysis_prompt;
use crate::InsightGenerator;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Client for Gemini text generation.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, InsightError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(InsightError::EmptyResponse(
                block_reason.map_or_else(|| "no candidates".to_string(), |r| format!("blocked: {r}")),
            ));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(InsightError::EmptyResponse(format!(
                "finish reason {}",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, InsightError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InsightError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("sociallens/0.1 (social-listening)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InsightError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    fn endpoint(&self) -> Result<Url, InsightError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| InsightError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends `prompt` and returns the model's raw text answer.
    ///
    /// # Errors
    ///
    /// - [`InsightError::Http`] on network failure or undecodable body.
    /// - [`InsightError::Status`] on a non-2xx response.
    /// - [`InsightError::EmptyResponse`] if the model produced no text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, InsightError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_MEDIUM_AND_ABOVE",
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_p: 0.8,
                top_k: 40,
                max_output_tokens: 1024,
            },
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload.into_text()
    }
}

#[async_trait]
impl InsightGenerator for GeminiClient {
    async fn generate(
        &self,
        brand_name: &str,
        posts: &[SocialPost],
        metrics: &Metrics,
    ) -> Result<Vec<String>, InsightError> {
        let prompt = build_analysis_prompt(brand_name, metrics);
        tracing::debug!(
            brand = brand_name,
            posts = posts.len(),
            prompt_chars = prompt.len(),
            "requesting AI insights"
        );

        let text = self.generate_text(&prompt).await?;
        let insights = parse_insights(&text);
        tracing::info!(
            brand = brand_name,
            count = insights.len(),
            "generated AI insights"
        );
        Ok(insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::with_base_url("test-key", "gemini-2.0-flash", 5, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_includes_model_name() {
        let client = test_client("https://generativelanguage.googleapis.com");
        assert_eq!(
            client.endpoint().expect("endpoint").as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "First line\n" }, { "text": "Second line" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }))
        .expect("deserialize");
        assert_eq!(response.into_text().unwrap(), "First line\nSecond line");
    }

    #[test]
    fn blocked_prompt_reports_block_reason() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .expect("deserialize");
        let err = response.into_text().unwrap_err();
        assert!(matches!(err, InsightError::EmptyResponse(ref r) if r == "blocked: SAFETY"));
    }

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
            safety_settings: vec![SafetySetting {
                category: SAFETY_CATEGORIES[0],
                threshold: "BLOCK_MEDIUM_AND_ABOVE",
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                top_p: 0.8,
                top_k: 40,
                max_output_tokens: 1024,
            },
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["safetySettings"][0]["category"], "HARM_CATEGORY_HARASSMENT");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
