//! Client for an upstream HTTP collector service.
//!
//! The upstream exposes `GET <base>/posts?brand=<name>` returning a JSON array
//! of posts. A 404 means the brand is unknown and maps to an empty result.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use sociallens_core::SocialPost;

use crate::{CollectorError, DataSource};

pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    /// Creates a source pointed at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`CollectorError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("sociallens/0.1 (social-listening)")
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CollectorError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn posts_url(&self, brand_name: &str) -> Result<Url, CollectorError> {
        let mut url = self
            .base_url
            .join("posts")
            .map_err(|e| CollectorError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("brand", brand_name);
        Ok(url)
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn collect(&self, brand_name: &str) -> Result<Vec<SocialPost>, CollectorError> {
        let url = self.posts_url(brand_name)?;
        tracing::info!(brand = brand_name, "starting data collection");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::info!(brand = brand_name, "collector has no data for brand");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(CollectorError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let posts: Vec<SocialPost> = response.json().await?;
        tracing::info!(
            brand = brand_name,
            count = posts.len(),
            "completed data collection"
        );
        Ok(posts)
    }
}
