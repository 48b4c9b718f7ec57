//! Spreadsheet persistence for search results.
//!
//! Each brand gets three worksheets in one Google spreadsheet: the raw posts,
//! the computed metrics, and a dashboard view. Persistence is best-effort;
//! callers log [`SheetsError`]s and carry on.

pub mod auth;
pub mod client;
pub mod error;
pub mod format;
pub mod layout;
pub mod report;

use async_trait::async_trait;
use sociallens_core::{Metrics, SocialPost};

pub use auth::{ServiceAccountKey, ServiceAccountTokens, TokenProvider};
pub use client::{a1_range, SheetsClient, ValueInput};
pub use error::SheetsError;
pub use layout::{sheet_title, SheetKind};
pub use report::SheetsReporter;

/// Destination for per-brand reports.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Replace the brand's raw-data worksheet with `posts`.
    async fn update_data_sheet(&self, brand: &str, posts: &[SocialPost]) -> Result<(), SheetsError>;

    /// Replace the brand's metrics worksheet, including any insights.
    async fn update_metrics_sheet(&self, brand: &str, metrics: &Metrics) -> Result<(), SheetsError>;

    async fn refresh_dashboard(&self, brand: &str) -> Result<(), SheetsError>;
}

/// Stand-in used when no spreadsheet is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledReporter;

#[async_trait]
impl ReportSink for DisabledReporter {
    async fn update_data_sheet(&self, _brand: &str, _posts: &[SocialPost]) -> Result<(), SheetsError> {
        Err(SheetsError::NotConfigured)
    }

    async fn update_metrics_sheet(&self, _brand: &str, _metrics: &Metrics) -> Result<(), SheetsError> {
        Err(SheetsError::NotConfigured)
    }

    async fn refresh_dashboard(&self, _brand: &str) -> Result<(), SheetsError> {
        Err(SheetsError::NotConfigured)
    }
}
