use thiserror::Error;

/// Errors returned by the insight service.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Network or TLS failure, or an undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Gemini returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered but produced no text (e.g. the prompt was blocked).
    #[error("Gemini returned no text: {0}")]
    EmptyResponse(String),

    #[error("insight service is not configured (GEMINI_API_KEY unset)")]
    NotConfigured,

    #[error("invalid Gemini base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
