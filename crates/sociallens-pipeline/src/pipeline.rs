use std::sync::Arc;

use sociallens_collector::{DataSource, MetricsProcessor};
use sociallens_core::{
    BrandQuery, Metrics, SearchResult, SocialPost, StepOutcome, INSIGHTS_EMPTY,
    INSIGHTS_UNAVAILABLE,
};
use sociallens_insights::InsightGenerator;
use sociallens_sheets::{ReportSink, SheetsError};

use crate::error::SearchError;

/// Result of a successful search plus how the best-effort steps went.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub result: SearchResult,
    pub insights: StepOutcome<Vec<String>>,
    pub persistence: StepOutcome<()>,
}

/// Composes the four services into one search operation.
///
/// Constructed once at startup and shared across requests.
pub struct SearchPipeline {
    source: Arc<dyn DataSource>,
    processor: Arc<dyn MetricsProcessor>,
    insights: Arc<dyn InsightGenerator>,
    reporter: Arc<dyn ReportSink>,
}

impl SearchPipeline {
    #[must_use]
    pub fn new(
        source: Arc<dyn DataSource>,
        processor: Arc<dyn MetricsProcessor>,
        insights: Arc<dyn InsightGenerator>,
        reporter: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            source,
            processor,
            insights,
            reporter,
        }
    }

    /// Run one search for `query`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NotFound`] when the source returns no posts; nothing
    ///   else runs in that case.
    /// - [`SearchError::Collect`] / [`SearchError::Process`] for unexpected
    ///   collector or processor failures.
    pub async fn run(&self, query: &BrandQuery) -> Result<SearchReport, SearchError> {
        let brand = query.name();

        let posts = self.source.collect(brand).await?;
        if posts.is_empty() {
            tracing::info!(brand, "no data found for brand");
            return Err(SearchError::NotFound {
                brand: brand.to_owned(),
            });
        }

        let metrics = self.processor.process(&posts)?;
        tracing::debug!(
            brand,
            total_posts = metrics.total_posts,
            total_engagement = metrics.total_engagement,
            "computed metrics"
        );

        let insight_outcome = self.generate_insights(brand, &posts, &metrics).await;
        let insights = insight_outcome
            .value()
            .cloned()
            .unwrap_or_else(|| vec![INSIGHTS_UNAVAILABLE.to_string()]);
        let metrics = metrics.with_insights(insights.clone());

        let persistence = self.persist(brand, &posts, &metrics).await;

        tracing::info!(
            brand,
            posts = posts.len(),
            insights = insight_outcome.label(),
            persistence = persistence.label(),
            "search complete"
        );

        Ok(SearchReport {
            result: SearchResult {
                data: posts,
                metrics,
                insights,
            },
            insights: insight_outcome,
            persistence,
        })
    }

    /// Never fails: errors and empty answers become a one-line fallback.
    async fn generate_insights(
        &self,
        brand: &str,
        posts: &[SocialPost],
        metrics: &Metrics,
    ) -> StepOutcome<Vec<String>> {
        match self.insights.generate(brand, posts, metrics).await {
            Ok(insights) if insights.is_empty() => {
                tracing::warn!(brand, "insight service returned no insights");
                StepOutcome::Degraded {
                    value: vec![INSIGHTS_EMPTY.to_string()],
                    reason: "insight service returned no insights".to_string(),
                }
            }
            Ok(insights) => StepOutcome::Ok(insights),
            Err(e) => {
                tracing::error!(brand, error = %e, "insight generation failed");
                StepOutcome::Degraded {
                    value: vec![INSIGHTS_UNAVAILABLE.to_string()],
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Data sheet, metrics sheet, dashboard; stops at the first failure.
    async fn persist(&self, brand: &str, posts: &[SocialPost], metrics: &Metrics) -> StepOutcome<()> {
        match self.persist_all(brand, posts, metrics).await {
            Ok(()) => StepOutcome::Ok(()),
            Err((step, e)) => {
                tracing::error!(brand, step, error = %e, "failed to persist report");
                StepOutcome::Failed {
                    reason: format!("{step}: {e}"),
                }
            }
        }
    }

    async fn persist_all(
        &self,
        brand: &str,
        posts: &[SocialPost],
        metrics: &Metrics,
    ) -> Result<(), (&'static str, SheetsError)> {
        self.reporter
            .update_data_sheet(brand, posts)
            .await
            .map_err(|e| ("data sheet", e))?;
        self.reporter
            .update_metrics_sheet(brand, metrics)
            .await
            .map_err(|e| ("metrics sheet", e))?;
        self.reporter
            .refresh_dashboard(brand)
            .await
            .map_err(|e| ("dashboard", e))
    }
}
