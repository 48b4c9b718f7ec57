//! AI-generated insights for a brand's social metrics.
//!
//! [`GeminiClient`] prompts the Gemini `generateContent` API with a summary of
//! the brand's metrics and turns the free-text answer into a short list of
//! bullet insights. Callers treat every failure as recoverable.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;

use async_trait::async_trait;
use sociallens_core::{Metrics, SocialPost};

pub use client::GeminiClient;
pub use error::InsightError;
pub use parse::parse_insights;
pub use prompt::build_analysis_prompt;

/// Produces natural-language insights for a brand.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(
        &self,
        brand_name: &str,
        posts: &[SocialPost],
        metrics: &Metrics,
    ) -> Result<Vec<String>, InsightError>;
}

/// Stand-in used when no API key is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledInsights;

#[async_trait]
impl InsightGenerator for DisabledInsights {
    async fn generate(
        &self,
        _brand_name: &str,
        _posts: &[SocialPost],
        _metrics: &Metrics,
    ) -> Result<Vec<String>, InsightError> {
        Err(InsightError::NotConfigured)
    }
}
