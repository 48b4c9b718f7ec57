//! [`ReportSink`] backed by Google Sheets.

use async_trait::async_trait;
use serde_json::{json, Value};
use sociallens_core::{Metrics, SocialPost};

use crate::client::{a1_range, SheetsClient, ValueInput};
use crate::error::SheetsError;
use crate::format::{background, bold_row, freeze_rows, text_format};
use crate::layout::{
    dashboard_cells, dashboard_link, data_rows, metrics_sheet, sentiment_color, sheet_title,
    SheetKind,
    DASHBOARD_COLUMNS, DASHBOARD_ROWS, DATA_HEADER, METRICS_COLUMNS,
};
use crate::ReportSink;

/// Column holding the sentiment percentage on the metrics worksheet.
const PERCENTAGE_COLUMN: usize = 2;

/// Dashboard cells styled as section headings.
const DASHBOARD_SECTION_ROWS: [usize; 3] = [3, 19, 35];

pub struct SheetsReporter {
    client: SheetsClient,
}

impl SheetsReporter {
    #[must_use]
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportSink for SheetsReporter {
    async fn update_data_sheet(&self, brand: &str, posts: &[SocialPost]) -> Result<(), SheetsError> {
        let title = sheet_title(brand, SheetKind::RawData);
        let rows = data_rows(posts);

        let sheet_id = self
            .client
            .ensure_sheet(&title, rows.len(), DATA_HEADER.len())
            .await?;
        self.client.clear_values(&a1_range(&title, "A1:H")).await?;
        self.client
            .update_values(&a1_range(&title, "A1"), &rows, ValueInput::Raw)
            .await?;
        self.client
            .batch_update(vec![
                bold_row(sheet_id, 0, DATA_HEADER.len()),
                freeze_rows(sheet_id, 1),
            ])
            .await?;

        tracing::info!(brand, sheet = %title, rows = posts.len(), "updated raw data sheet");
        Ok(())
    }

    async fn update_metrics_sheet(&self, brand: &str, metrics: &Metrics) -> Result<(), SheetsError> {
        let title = sheet_title(brand, SheetKind::Metrics);
        let sheet = metrics_sheet(metrics);

        let sheet_id = self
            .client
            .ensure_sheet(&title, sheet.rows.len(), METRICS_COLUMNS)
            .await?;
        self.client.clear_values(&a1_range(&title, "A1:D")).await?;
        self.client
            .update_values(&a1_range(&title, "A1"), &sheet.rows, ValueInput::Raw)
            .await?;

        let requests: Vec<Value> = sheet
            .bold_rows
            .iter()
            .map(|&row| bold_row(sheet_id, row, METRICS_COLUMNS))
            .chain(sheet.sentiment_rows.iter().map(|&(row, percentage)| {
                background(sheet_id, row, PERCENTAGE_COLUMN, sentiment_color(percentage))
            }))
            .collect();
        self.client.batch_update(requests).await?;

        tracing::info!(brand, sheet = %title, "updated metrics sheet");
        Ok(())
    }

    async fn refresh_dashboard(&self, brand: &str) -> Result<(), SheetsError> {
        let title = sheet_title(brand, SheetKind::Dashboard);
        let sheet_id = self
            .client
            .ensure_sheet(&title, DASHBOARD_ROWS, DASHBOARD_COLUMNS)
            .await?;

        let updated_at = chrono::Local::now().naive_local();
        let data: Vec<(String, Vec<Vec<Value>>)> = dashboard_cells(brand, updated_at)
            .into_iter()
            .map(|(cell, value)| (a1_range(&title, cell), vec![vec![json!(value)]]))
            .collect();
        self.client.batch_update_values(&data, ValueInput::Raw).await?;

        // only the link cell is parsed as a formula
        let (link_cell, formula) = dashboard_link(self.client.spreadsheet_id());
        self.client
            .update_values(
                &a1_range(&title, link_cell),
                &[vec![json!(formula)]],
                ValueInput::UserEntered,
            )
            .await?;

        let mut requests = vec![
            text_format(sheet_id, 0, (0, 1), &json!({ "bold": true, "fontSize": 16 })),
            text_format(sheet_id, 1, (0, 1), &json!({ "italic": true })),
        ];
        requests.extend(
            DASHBOARD_SECTION_ROWS
                .iter()
                .map(|&row| text_format(sheet_id, row, (0, 1), &json!({ "bold": true, "fontSize": 14 }))),
        );
        self.client.batch_update(requests).await?;

        tracing::info!(brand, sheet = %title, "refreshed dashboard");
        Ok(())
    }
}
