//! Social media data collection and metric derivation.
//!
//! A [`DataSource`] turns a brand name into a list of posts (simulated, or
//! fetched from an upstream HTTP collector), optionally snapshotting them to
//! disk. A [`MetricsProcessor`] summarises those posts into [`Metrics`].
//!
//! [`Metrics`]: sociallens_core::Metrics

pub mod error;
pub mod http;
pub mod processor;
pub mod simulated;
pub mod snapshot;

use async_trait::async_trait;
use sociallens_core::{Metrics, SocialPost};

pub use error::{CollectorError, ProcessorError};
pub use http::HttpSource;
pub use processor::{compute_metrics, EngagementProcessor};
pub use simulated::{generate_posts, SimulatedSource};
pub use snapshot::{snapshot_file_name, SnapshotSource};

/// Produces raw posts for a brand. An empty list means "nothing found".
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn collect(&self, brand_name: &str) -> Result<Vec<SocialPost>, CollectorError>;
}

/// Derives a metrics summary from collected posts.
pub trait MetricsProcessor: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ProcessorError`] when a post cannot be summarised.
    fn process(&self, posts: &[SocialPost]) -> Result<Metrics, ProcessorError>;
}
