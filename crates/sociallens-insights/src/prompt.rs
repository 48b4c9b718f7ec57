use sociallens_core::Metrics;

/// Build the analysis prompt sent to the model for `brand_name`.
#[must_use]
pub fn build_analysis_prompt(brand_name: &str, metrics: &Metrics) -> String {
    let platform_summary = metrics
        .platform_stats
        .iter()
        .map(|(platform, stats)| {
            format!(
                "- {platform}: {} posts, {} total engagement",
                stats.posts,
                group_thousands(stats.total_engagement)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let sentiment_summary = metrics
        .sentiment_stats
        .iter()
        .map(|(sentiment, stats)| {
            format!("- {sentiment}: {} posts ({:.1}%)", stats.count, stats.percentage)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "As a social media analytics expert, analyze the following data for {brand_name} and provide actionable insights.

Key Performance Indicators:
- Total Posts: {total_posts}
- Total Engagement: {total_engagement}
- Average Engagement Rate: {rate:.2} per post

Platform Performance:
{platforms}

Sentiment Distribution:
{sentiments}

Please provide 3-5 actionable insights about:
1. Overall brand performance and engagement trends
2. Platform-specific recommendations for improvement
3. Sentiment analysis and brand perception
4. Content strategy recommendations
5. Opportunities for growth and engagement

Format each insight as a clear, concise statement with specific recommendations where applicable. Focus on actionable insights that can drive improvement. Do not use markdown formatting or special characters.",
        total_posts = group_thousands(metrics.total_posts),
        total_engagement = group_thousands(metrics.total_engagement),
        rate = metrics.engagement_rate(),
        platforms = platform_summary,
        sentiments = sentiment_summary,
    )
}

/// `1234567` → `"1,234,567"`.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
