//! Cell contents for the three per-brand worksheets.
//!
//! Everything here is pure so the layouts can be tested without a server.

use chrono::NaiveDateTime;
use serde_json::{json, Value};
use sociallens_core::{Metrics, SocialPost};

pub const DATA_HEADER: [&str; 8] = [
    "Date",
    "Platform",
    "Content",
    "Likes",
    "Comments",
    "Shares",
    "Sentiment",
    "URL",
];

pub const METRICS_COLUMNS: usize = 4;
pub const DASHBOARD_ROWS: usize = 100;
pub const DASHBOARD_COLUMNS: usize = 20;

/// The worksheets kept for each brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    RawData,
    Metrics,
    Dashboard,
}

impl SheetKind {
    fn suffix(self) -> &'static str {
        match self {
            Self::RawData => "Raw Data",
            Self::Metrics => "Metrics",
            Self::Dashboard => "Dashboard",
        }
    }
}

/// Worksheet titles are capped at 100 characters by the API.
const MAX_BRAND_CHARS: usize = 80;

/// `Acme` + [`SheetKind::Metrics`] → `Acme - Metrics`.
#[must_use]
pub fn sheet_title(brand: &str, kind: SheetKind) -> String {
    let brand: String = brand.chars().take(MAX_BRAND_CHARS).collect();
    format!("{brand} - {}", kind.suffix())
}

/// Header row plus one row per post.
#[must_use]
pub fn data_rows(posts: &[SocialPost]) -> Vec<Vec<Value>> {
    let mut rows = Vec::with_capacity(posts.len() + 1);
    rows.push(DATA_HEADER.iter().map(|h| json!(h)).collect());
    rows.extend(posts.iter().map(|post| {
        vec![
            json!(post.date),
            json!(post.platform),
            json!(post.content),
            json!(post.engagement.likes),
            json!(post.engagement.comments),
            json!(post.engagement.shares),
            json!(post.sentiment.as_str()),
            json!(post.url),
        ]
    }));
    rows
}

/// Rows of the metrics worksheet and which of them get styled.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSheet {
    pub rows: Vec<Vec<Value>>,
    /// Zero-based indices of section title and table header rows.
    pub bold_rows: Vec<usize>,
    /// Zero-based row index and percentage of each sentiment row.
    pub sentiment_rows: Vec<(usize, f64)>,
}

impl MetricsSheet {
    fn push(&mut self, row: Vec<Value>) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    fn push_bold(&mut self, row: Vec<Value>) {
        let index = self.push(row);
        self.bold_rows.push(index);
    }

    fn push_blank(&mut self) {
        self.push(vec![json!(""), json!("")]);
    }
}

#[must_use]
pub fn metrics_sheet(metrics: &Metrics) -> MetricsSheet {
    let mut sheet = MetricsSheet {
        rows: Vec::new(),
        bold_rows: Vec::new(),
        sentiment_rows: Vec::new(),
    };

    let rate = if metrics.total_posts > 0 {
        format!("{:.2}", metrics.engagement_rate())
    } else {
        "0".to_string()
    };
    sheet.push_bold(vec![json!("Metrics"), json!("Value")]);
    sheet.push(vec![json!("Total Posts"), json!(metrics.total_posts)]);
    sheet.push(vec![json!("Total Engagement"), json!(metrics.total_engagement)]);
    sheet.push(vec![json!("Average Engagement Rate"), json!(rate)]);
    sheet.push_blank();

    sheet.push_bold(vec![json!("Platform Statistics"), json!("")]);
    sheet.push_bold(vec![
        json!("Platform"),
        json!("Total Engagement"),
        json!("Posts"),
        json!("Avg. Engagement"),
    ]);
    for (platform, stats) in &metrics.platform_stats {
        sheet.push(vec![
            json!(platform),
            json!(stats.total_engagement),
            json!(stats.posts),
            json!(format!("{:.2}", stats.avg_engagement)),
        ]);
    }
    sheet.push_blank();

    sheet.push_bold(vec![json!("Sentiment Distribution"), json!("")]);
    sheet.push_bold(vec![json!("Sentiment"), json!("Count"), json!("Percentage")]);
    for (sentiment, stats) in &metrics.sentiment_stats {
        let index = sheet.push(vec![
            json!(sentiment),
            json!(stats.count),
            json!(format!("{:.1}%", stats.percentage)),
        ]);
        sheet.sentiment_rows.push((index, stats.percentage));
    }
    sheet.push_blank();

    sheet.push_bold(vec![json!("AI-Generated Insights"), json!("")]);
    match metrics.insights.as_deref() {
        Some(insights) if !insights.is_empty() => {
            for insight in insights {
                sheet.push(vec![json!(insight), json!("")]);
            }
        }
        _ => {
            sheet.push(vec![json!("No insights available"), json!("")]);
        }
    }

    sheet
}

/// Background colour for a sentiment percentage cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

#[must_use]
pub fn sentiment_color(percentage: f64) -> Rgb {
    if percentage > 50.0 {
        Rgb { red: 0.8, green: 1.0, blue: 0.8 }
    } else if percentage > 25.0 {
        Rgb { red: 1.0, green: 1.0, blue: 0.8 }
    } else {
        Rgb { red: 1.0, green: 0.8, blue: 0.8 }
    }
}

#[must_use]
pub fn data_studio_url(spreadsheet_id: &str) -> String {
    format!(
        "https://datastudio.google.com/reporting/create?ds=spreadsheets&spreadsheetId={spreadsheet_id}"
    )
}

/// Plain-text `(cell, value)` pairs written to the dashboard worksheet.
#[must_use]
pub fn dashboard_cells(brand: &str, updated_at: NaiveDateTime) -> Vec<(&'static str, String)> {
    vec![
        ("A1", format!("Social Media Dashboard - {brand}")),
        (
            "A2",
            format!("Last Updated: {}", updated_at.format("%Y-%m-%d %H:%M:%S")),
        ),
        ("A4", "Platform Performance".to_string()),
        ("A20", "Sentiment Distribution".to_string()),
        ("A36", "Engagement Trends".to_string()),
        (
            "A50",
            "To view interactive visualizations, click the link below to open in Google Data Studio:"
                .to_string(),
        ),
    ]
}

/// The dashboard's Data Studio link: a `HYPERLINK` formula for cell A51.
#[must_use]
pub fn dashboard_link(spreadsheet_id: &str) -> (&'static str, String) {
    (
        "A51",
        format!(
            "=HYPERLINK(\"{}\", \"Open in Google Data Studio\")",
            data_studio_url(spreadsheet_id)
        ),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sociallens_core::{Engagement, PlatformStats, Sentiment, SentimentStats};

    use super::*;

    fn post() -> SocialPost {
        SocialPost {
            platform: "Twitter".to_string(),
            date: "2026-10-01 12:00:00".to_string(),
            content: "Loving the new Acme launch".to_string(),
            engagement: Engagement {
                likes: 10,
                comments: 2,
                shares: 1,
            },
            sentiment: Sentiment::Positive,
            url: "https://twitter.com/acme/status/1".to_string(),
        }
    }

    fn sample_metrics() -> Metrics {
        let mut platform_stats = BTreeMap::new();
        platform_stats.insert(
            "Twitter".to_string(),
            PlatformStats {
                total_engagement: 13,
                posts: 1,
                avg_engagement: 13.0,
            },
        );
        let mut sentiment_stats = BTreeMap::new();
        sentiment_stats.insert(
            "negative".to_string(),
            SentimentStats {
                count: 1,
                percentage: 25.0,
            },
        );
        sentiment_stats.insert(
            "positive".to_string(),
            SentimentStats {
                count: 3,
                percentage: 75.0,
            },
        );
        Metrics {
            total_posts: 4,
            total_engagement: 50,
            platform_stats,
            sentiment_stats,
            ..Metrics::default()
        }
    }

    #[test]
    fn sheet_titles_carry_brand_and_kind() {
        assert_eq!(sheet_title("Acme", SheetKind::RawData), "Acme - Raw Data");
        assert_eq!(sheet_title("Acme", SheetKind::Dashboard), "Acme - Dashboard");
        let long = "x".repeat(150);
        assert!(sheet_title(&long, SheetKind::Metrics).chars().count() <= 100);
    }

    #[test]
    fn data_rows_start_with_header() {
        let rows = data_rows(&[post()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Date");
        assert_eq!(rows[0][7], "URL");
        assert_eq!(rows[1][1], "Twitter");
        assert_eq!(rows[1][3], 10);
        assert_eq!(rows[1][6], "positive");
    }

    #[test]
    fn data_rows_for_no_posts_is_header_only() {
        assert_eq!(data_rows(&[]).len(), 1);
    }

    #[test]
    fn metrics_sheet_lays_out_sections() {
        let sheet = metrics_sheet(&sample_metrics());

        assert_eq!(sheet.rows[1], vec![json!("Total Posts"), json!(4)]);
        assert_eq!(sheet.rows[3], vec![json!("Average Engagement Rate"), json!("12.50")]);
        assert_eq!(sheet.rows[5][0], "Platform Statistics");
        assert_eq!(sheet.rows[7][3], "13.00");

        // header, platform title, platform header, sentiment title,
        // sentiment header, insights title
        assert_eq!(sheet.bold_rows, vec![0, 5, 6, 9, 10, 14]);
        assert_eq!(sheet.sentiment_rows, vec![(11, 25.0), (12, 75.0)]);
        assert_eq!(sheet.rows[12][2], "75.0%");
        assert_eq!(
            sheet.rows.last().expect("rows"),
            &vec![json!("No insights available"), json!("")]
        );
    }

    #[test]
    fn metrics_sheet_lists_insights() {
        let metrics = sample_metrics().with_insights(vec!["• One.".into(), "• Two.".into()]);
        let sheet = metrics_sheet(&metrics);
        let tail: Vec<&Value> = sheet.rows.iter().rev().take(2).map(|r| &r[0]).collect();
        assert_eq!(tail, vec![&json!("• Two."), &json!("• One.")]);
    }

    #[test]
    fn empty_metrics_report_zero_rate() {
        let sheet = metrics_sheet(&Metrics::default());
        assert_eq!(sheet.rows[3][1], "0");
        assert!(sheet.sentiment_rows.is_empty());
    }

    #[test]
    fn sentiment_color_thresholds() {
        assert_eq!(sentiment_color(60.0).green, 1.0);
        assert_eq!(sentiment_color(60.0).red, 0.8);
        assert_eq!(sentiment_color(50.0), sentiment_color(30.0));
        assert_eq!(sentiment_color(30.0).blue, 0.8);
        assert_eq!(sentiment_color(25.0).green, 0.8);
    }

    #[test]
    fn dashboard_links_to_data_studio() {
        let updated = chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        let cells = dashboard_cells("Acme", updated);

        assert_eq!(cells[0], ("A1", "Social Media Dashboard - Acme".to_string()));
        assert_eq!(cells[1].1, "Last Updated: 2026-10-19 09:30:00");
        assert!(cells.iter().all(|(_, text)| !text.starts_with('=')));
        assert_eq!(
            cells[5],
            (
                "A50",
                "To view interactive visualizations, click the link below to open in Google Data Studio:"
                    .to_string()
            )
        );

        let (cell, formula) = dashboard_link("sheet-123");
        assert_eq!(cell, "A51");
        assert!(formula.starts_with("=HYPERLINK(\"https://datastudio.google.com/"));
        assert!(formula.contains("spreadsheetId=sheet-123"));
    }
}
