//! Builds the pipeline's services from [`AppConfig`].
//!
//! Missing insight or spreadsheet credentials are tolerated in development,
//! where disabled stand-ins are installed and every search degrades. Outside
//! development they fail startup.

use std::path::Path;
use std::sync::Arc;

use sociallens_collector::{
    DataSource, EngagementProcessor, HttpSource, SimulatedSource, SnapshotSource,
};
use sociallens_core::AppConfig;
use sociallens_insights::{DisabledInsights, GeminiClient, InsightGenerator};
use sociallens_sheets::{DisabledReporter, ReportSink, SheetsClient, SheetsReporter, TokenProvider};

use crate::error::WiringError;
use crate::pipeline::SearchPipeline;

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// When false the spreadsheet reporter is replaced by [`DisabledReporter`].
    pub report: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { report: true }
    }
}

/// # Errors
///
/// Returns [`WiringError::MissingSetting`] when a required credential is
/// unset outside development, or the construction error of any client.
pub fn build_pipeline(
    config: &AppConfig,
    options: PipelineOptions,
) -> Result<SearchPipeline, WiringError> {
    let source = build_source(config)?;
    let insights = build_insights(config)?;
    let reporter: Arc<dyn ReportSink> = if options.report {
        build_reporter(config)?
    } else {
        tracing::info!("spreadsheet reporting disabled by caller");
        Arc::new(DisabledReporter)
    };

    Ok(SearchPipeline::new(
        source,
        Arc::new(EngagementProcessor),
        insights,
        reporter,
    ))
}

fn build_source(config: &AppConfig) -> Result<Arc<dyn DataSource>, WiringError> {
    let data_dir = config.data_dir.as_deref();
    match config.collector_url.as_deref() {
        Some(url) => {
            tracing::info!(url, "collecting posts from upstream HTTP collector");
            let source = HttpSource::new(url, config.request_timeout_secs)?;
            Ok(with_snapshot(source, data_dir))
        }
        None => {
            tracing::info!(days = config.simulated_days, "collecting simulated posts");
            Ok(with_snapshot(
                SimulatedSource::new(config.simulated_days),
                data_dir,
            ))
        }
    }
}

fn with_snapshot<S: DataSource + 'static>(source: S, dir: Option<&Path>) -> Arc<dyn DataSource> {
    match dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "saving collected posts to disk");
            Arc::new(SnapshotSource::new(source, dir))
        }
        None => Arc::new(source),
    }
}

fn build_insights(config: &AppConfig) -> Result<Arc<dyn InsightGenerator>, WiringError> {
    if let Some(api_key) = config.gemini_api_key.as_deref() {
        let client = GeminiClient::new(api_key, &config.gemini_model, config.request_timeout_secs)?;
        return Ok(Arc::new(client));
    }

    if config.is_development() {
        tracing::warn!("GEMINI_API_KEY not set; AI insights disabled in development environment");
        return Ok(Arc::new(DisabledInsights));
    }

    Err(WiringError::MissingSetting {
        var: "GEMINI_API_KEY",
        env: config.env.clone(),
    })
}

fn build_reporter(config: &AppConfig) -> Result<Arc<dyn ReportSink>, WiringError> {
    match (
        config.google_credentials_path.as_deref(),
        config.spreadsheet_id.as_deref(),
    ) {
        (Some(credentials), Some(spreadsheet_id)) => {
            let auth = TokenProvider::from_key_file(credentials, config.request_timeout_secs)?;
            let client = SheetsClient::new(spreadsheet_id, auth, config.request_timeout_secs)?;
            Ok(Arc::new(SheetsReporter::new(client)))
        }
        (credentials, _) if config.is_development() => {
            tracing::warn!(
                credentials = credentials.is_some(),
                "spreadsheet not configured; reporting disabled in development environment"
            );
            Ok(Arc::new(DisabledReporter))
        }
        (None, _) => Err(WiringError::MissingSetting {
            var: "GOOGLE_APPLICATION_CREDENTIALS",
            env: config.env.clone(),
        }),
        (Some(_), None) => Err(WiringError::MissingSetting {
            var: "SOCIALLENS_SPREADSHEET_ID",
            env: config.env.clone(),
        }),
    }
}
