use thiserror::Error;

/// Errors returned while collecting posts for a brand.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Network, TLS, or body decoding failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream collector answered with a non-success status other than 404.
    #[error("collector returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid collector URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors returned while deriving metrics.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("post {url} has an unparseable date '{date}': {source}")]
    InvalidDate {
        url: String,
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    /// An engagement sum does not fit in `u64`.
    #[error("engagement total overflowed at post {url}")]
    Overflow { url: String },
}
