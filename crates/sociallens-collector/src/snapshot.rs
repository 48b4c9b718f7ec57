//! Best-effort JSON snapshots of collected posts.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sociallens_core::SocialPost;

use crate::{CollectorError, DataSource};

/// Wraps another source and writes each non-empty result to `dir`.
///
/// Write failures are logged and never change the collection result.
pub struct SnapshotSource<S> {
    inner: S,
    dir: PathBuf,
}

impl<S> SnapshotSource<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }
}

#[async_trait]
impl<S: DataSource> DataSource for SnapshotSource<S> {
    async fn collect(&self, brand_name: &str) -> Result<Vec<SocialPost>, CollectorError> {
        let posts = self.inner.collect(brand_name).await?;
        if !posts.is_empty() {
            let path = self.dir.join(snapshot_file_name(brand_name));
            match write_snapshot(&path, &posts).await {
                Ok(()) => tracing::info!(path = %path.display(), "saved collection snapshot"),
                Err(e) => tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "failed to save collection snapshot"
                ),
            }
        }
        Ok(posts)
    }
}

/// File name for a brand's snapshot: lowercased, anything but letters, digits and `-` becomes `_`.
#[must_use]
pub fn snapshot_file_name(brand_name: &str) -> String {
    let stem: String = brand_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{stem}_data.json")
}

async fn write_snapshot(path: &Path, posts: &[SocialPost]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let body = serde_json::to_vec_pretty(posts)?;
    tokio::fs::write(path, body).await
}
