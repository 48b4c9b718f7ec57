use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::QueryError;

/// A brand name accepted for one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandQuery {
    name: String,
}

impl BrandQuery {
    /// Validate a raw brand name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyBrandName`] if nothing remains after trimming.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(QueryError::EmptyBrandName);
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for BrandQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl Engagement {
    /// Sum of likes, comments and shares, or `None` if it overflows `u64`.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.likes
            .checked_add(self.comments)?
            .checked_add(self.shares)
    }
}

/// One social media post collected for a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: String,
    /// Posting time, formatted `%Y-%m-%d %H:%M:%S`.
    pub date: String,
    pub content: String,
    pub engagement: Engagement,
    pub sentiment: Sentiment,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_engagement: u64,
    pub posts: u64,
    pub avg_engagement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub count: u64,
    /// Share of all posts, in `[0.0, 100.0]`.
    pub percentage: f64,
}

/// Summary derived from a brand's collected posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_posts: u64,
    pub total_engagement: u64,
    pub platform_stats: BTreeMap<String, PlatformStats>,
    pub sentiment_stats: BTreeMap<String, SentimentStats>,
    /// Engagement per calendar day (`YYYY-MM-DD`), ordered by date.
    pub daily_engagement: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
}

impl Metrics {
    /// Attach the final insight list so persisted metrics carry it.
    #[must_use]
    pub fn with_insights(mut self, insights: Vec<String>) -> Self {
        self.insights = Some(insights);
        self
    }

    /// Mean engagement per post, `0.0` when there are no posts.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_rate(&self) -> f64 {
        if self.total_posts == 0 {
            0.0
        } else {
            self.total_engagement as f64 / self.total_posts as f64
        }
    }
}

/// Response body of a successful brand search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub data: Vec<SocialPost>,
    pub metrics: Metrics,
    pub insights: Vec<String>,
}
