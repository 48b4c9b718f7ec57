//! Simulated post generator used when no upstream collector is configured.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use rand::seq::IndexedRandom;
use rand::Rng;
use sociallens_core::{Engagement, Sentiment, SocialPost};

use crate::{CollectorError, DataSource};

const PLATFORMS: &[&str] = &["Instagram", "Facebook", "X"];

/// Timestamp format shared by every post source.
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generates plausible-looking posts for any brand.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    days: u32,
}

impl SimulatedSource {
    #[must_use]
    pub fn new(days: u32) -> Self {
        Self { days }
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(30)
    }
}

#[async_trait]
impl DataSource for SimulatedSource {
    async fn collect(&self, brand_name: &str) -> Result<Vec<SocialPost>, CollectorError> {
        tracing::debug!(brand = brand_name, days = self.days, "generating simulated posts");
        let now = chrono::Local::now().naive_local();
        let posts = generate_posts(brand_name, self.days, now, &mut rand::rng());
        tracing::info!(
            brand = brand_name,
            count = posts.len(),
            "completed simulated collection"
        );
        Ok(posts)
    }
}

/// Generate 1-5 posts for each day from `end - days` through `end`, inclusive.
pub fn generate_posts<R: Rng + ?Sized>(
    brand_name: &str,
    days: u32,
    end: NaiveDateTime,
    rng: &mut R,
) -> Vec<SocialPost> {
    let slug = brand_name.to_lowercase().replace(' ', "-");
    let start = end - Duration::days(i64::from(days));
    let mut posts = Vec::new();

    let mut current = start;
    while current <= end {
        let posts_per_day = rng.random_range(1..=5);
        let date = current.format(POST_DATE_FORMAT).to_string();

        for _ in 0..posts_per_day {
            let platform = PLATFORMS.choose(rng).copied().unwrap_or("X");
            let sentiment = Sentiment::ALL
                .choose(rng)
                .copied()
                .unwrap_or(Sentiment::Neutral);
            posts.push(SocialPost {
                platform: platform.to_string(),
                date: date.clone(),
                content: format!("Sample post about {brand_name}"),
                engagement: Engagement {
                    likes: rng.random_range(100..=10_000),
                    comments: rng.random_range(10..=500),
                    shares: rng.random_range(5..=200),
                },
                sentiment,
                url: format!(
                    "https://example.com/{slug}/{}",
                    rng.random_range(1000..=9999)
                ),
            });
        }

        current += Duration::days(1);
    }

    posts
}
