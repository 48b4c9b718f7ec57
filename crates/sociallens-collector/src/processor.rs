//! Engagement and sentiment metrics over collected posts.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use sociallens_core::{Metrics, PlatformStats, SentimentStats, SocialPost};

use crate::simulated::POST_DATE_FORMAT;
use crate::{MetricsProcessor, ProcessorError};

/// Default processor: totals, per-platform and per-sentiment breakdowns,
/// and engagement per day.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementProcessor;

impl MetricsProcessor for EngagementProcessor {
    fn process(&self, posts: &[SocialPost]) -> Result<Metrics, ProcessorError> {
        compute_metrics(posts)
    }
}

/// Summarise `posts` into [`Metrics`]. Empty input yields all-zero metrics.
///
/// # Errors
///
/// Returns [`ProcessorError::InvalidDate`] if a post's `date` does not match
/// `%Y-%m-%d %H:%M:%S`, or [`ProcessorError::Overflow`] if an engagement
/// sum exceeds `u64::MAX`.
#[allow(clippy::cast_precision_loss)]
pub fn compute_metrics(posts: &[SocialPost]) -> Result<Metrics, ProcessorError> {
    if posts.is_empty() {
        tracing::warn!("no posts provided for processing");
        return Ok(Metrics::default());
    }

    let mut total_posts = 0u64;
    let mut total_engagement = 0u64;
    let mut platform_totals: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    let mut sentiment_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut daily_engagement: BTreeMap<String, u64> = BTreeMap::new();

    for post in posts {
        let overflow = || ProcessorError::Overflow {
            url: post.url.clone(),
        };
        let engagement = post.engagement.total().ok_or_else(overflow)?;
        let day = NaiveDateTime::parse_from_str(&post.date, POST_DATE_FORMAT)
            .map_err(|source| ProcessorError::InvalidDate {
                url: post.url.clone(),
                date: post.date.clone(),
                source,
            })?
            .date()
            .format("%Y-%m-%d")
            .to_string();

        total_posts += 1;
        total_engagement = total_engagement
            .checked_add(engagement)
            .ok_or_else(overflow)?;

        let entry = platform_totals.entry(post.platform.clone()).or_default();
        entry.0 = entry.0.checked_add(engagement).ok_or_else(overflow)?;
        entry.1 += 1;

        *sentiment_counts
            .entry(post.sentiment.as_str().to_string())
            .or_default() += 1;
        let daily = daily_engagement.entry(day).or_default();
        *daily = daily.checked_add(engagement).ok_or_else(overflow)?;
    }

    let platform_stats = platform_totals
        .into_iter()
        .map(|(platform, (engagement, count))| {
            let stats = PlatformStats {
                total_engagement: engagement,
                posts: count,
                avg_engagement: engagement as f64 / count as f64,
            };
            (platform, stats)
        })
        .collect();

    let sentiment_stats = sentiment_counts
        .into_iter()
        .map(|(sentiment, count)| {
            let stats = SentimentStats {
                count,
                percentage: count as f64 / total_posts as f64 * 100.0,
            };
            (sentiment, stats)
        })
        .collect();

    Ok(Metrics {
        total_posts,
        total_engagement,
        platform_stats,
        sentiment_stats,
        daily_engagement,
        insights: None,
    })
}

#[cfg(test)]
mod tests {
    use sociallens_core::{Engagement, Sentiment};

    use super::*;

    fn post(platform: &str, date: &str, likes: u64, sentiment: Sentiment) -> SocialPost {
        SocialPost {
            platform: platform.to_string(),
            date: date.to_string(),
            content: "Sample post about Acme".to_string(),
            engagement: Engagement {
                likes,
                comments: 10,
                shares: 5,
            },
            sentiment,
            url: format!("https://example.com/acme/{likes}"),
        }
    }

    #[test]
    fn empty_input_yields_zero_metrics() {
        let metrics = compute_metrics(&[]).expect("empty is valid");
        assert_eq!(metrics, Metrics::default());
    }

    #[test]
    fn totals_and_breakdowns_are_computed() {
        let posts = vec![
            post("Instagram", "2025-03-01 10:00:00", 100, Sentiment::Positive),
            post("Instagram", "2025-03-02 10:00:00", 300, Sentiment::Negative),
            post("X", "2025-03-01 18:00:00", 185, Sentiment::Positive),
            post("Facebook", "2025-03-03 08:00:00", 85, Sentiment::Neutral),
        ];

        let metrics = compute_metrics(&posts).expect("valid posts");

        assert_eq!(metrics.total_posts, 4);
        // Each post adds 15 comments+shares on top of its likes.
        assert_eq!(metrics.total_engagement, 100 + 300 + 185 + 85 + 4 * 15);

        let instagram = &metrics.platform_stats["Instagram"];
        assert_eq!(instagram.posts, 2);
        assert_eq!(instagram.total_engagement, 430);
        assert!((instagram.avg_engagement - 215.0).abs() < f64::EPSILON);

        let positive = &metrics.sentiment_stats["positive"];
        assert_eq!(positive.count, 2);
        assert!((positive.percentage - 50.0).abs() < f64::EPSILON);
        assert!((metrics.sentiment_stats["neutral"].percentage - 25.0).abs() < f64::EPSILON);

        let days: Vec<(&str, u64)> = metrics
            .daily_engagement
            .iter()
            .map(|(d, e)| (d.as_str(), *e))
            .collect();
        assert_eq!(
            days,
            vec![("2025-03-01", 115 + 200), ("2025-03-02", 315), ("2025-03-03", 100)]
        );
        assert!(metrics.insights.is_none());
    }

    #[test]
    fn invalid_date_is_an_error() {
        let posts = vec![post("X", "yesterday", 100, Sentiment::Neutral)];
        let err = compute_metrics(&posts).unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidDate { ref date, .. } if date == "yesterday"));
    }

    #[test]
    fn engagement_overflow_in_one_post_is_an_error() {
        let mut huge = post("X", "2025-03-01 10:00:00", u64::MAX, Sentiment::Positive);
        huge.engagement.shares = 0;
        let err = compute_metrics(&[huge]).unwrap_err();
        assert!(matches!(err, ProcessorError::Overflow { ref url } if url.ends_with(&u64::MAX.to_string())));
    }

    #[test]
    fn engagement_overflow_across_posts_is_an_error() {
        let posts = vec![
            post("X", "2025-03-01 10:00:00", u64::MAX - 20, Sentiment::Positive),
            post("X", "2025-03-02 10:00:00", 100, Sentiment::Negative),
        ];
        let err = compute_metrics(&posts).unwrap_err();
        assert!(matches!(err, ProcessorError::Overflow { ref url } if url.ends_with("/100")));
    }

    #[test]
    fn processor_trait_delegates_to_compute_metrics() {
        let posts = vec![post("X", "2025-03-01 10:00:00", 100, Sentiment::Neutral)];
        let metrics = EngagementProcessor.process(&posts).expect("valid");
        assert_eq!(metrics.total_posts, 1);
    }
}
