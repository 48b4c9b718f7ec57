//! Shared domain types and configuration for the social listening service.

pub mod app_config;
pub mod config;
pub mod outcome;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use outcome::StepOutcome;
pub use types::{
    BrandQuery, Engagement, Metrics, PlatformStats, SearchResult, Sentiment, SentimentStats,
    SocialPost,
};

use thiserror::Error;

/// Insight list used when the insight service fails outright.
pub const INSIGHTS_UNAVAILABLE: &str = "Unable to generate AI insights at this time.";

/// Insight list used when the insight service succeeds but returns nothing.
pub const INSIGHTS_EMPTY: &str = "No AI insights available at this time.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Brand name must not be empty")]
    EmptyBrandName,
}
