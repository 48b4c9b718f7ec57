use sociallens_collector::{CollectorError, ProcessorError};
use sociallens_core::Environment;
use sociallens_insights::InsightError;
use sociallens_sheets::SheetsError;
use thiserror::Error;

/// Failures that end a search. Insight and persistence problems never
/// appear here; they are carried as outcomes on the report instead.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No data found for the specified brand")]
    NotFound { brand: String },

    #[error(transparent)]
    Collect(#[from] CollectorError),

    #[error(transparent)]
    Process(#[from] ProcessorError),
}

/// Failures while constructing the services from configuration.
#[derive(Debug, Error)]
pub enum WiringError {
    #[error("{var} is required outside development (environment: {env})")]
    MissingSetting {
        var: &'static str,
        env: Environment,
    },

    #[error("failed to build data source: {0}")]
    Collector(#[from] CollectorError),

    #[error("failed to build insight client: {0}")]
    Insights(#[from] InsightError),

    #[error("failed to build spreadsheet reporter: {0}")]
    Sheets(#[from] SheetsError),
}
