use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the spreadsheet reporter.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure, or an undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Sheets or token endpoint answered with a non-success status.
    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to read service-account key {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid service-account key: {0}")]
    InvalidKey(#[from] serde_json::Error),

    /// Signing the token assertion failed (bad PEM, unsupported key).
    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("unexpected Sheets API response: {0}")]
    UnexpectedResponse(String),

    #[error("spreadsheet reporter is not configured (credentials or spreadsheet id unset)")]
    NotConfigured,

    #[error("invalid Sheets URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
