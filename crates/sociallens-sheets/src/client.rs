//! Thin client for the Google Sheets v4 REST API.
//!
//! Only the calls the reporter needs: list worksheets, add or resize one,
//! clear and write value ranges, and send formatting `batchUpdate` requests.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::TokenProvider;
use crate::error::SheetsError;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Worksheet id and title within one spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<Value>,
}

/// How the API interprets written values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    /// Stored exactly as sent.
    Raw,
    /// Parsed as if typed into the UI: formulas, dates and percentages.
    UserEntered,
}

impl ValueInput {
    fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// Quote a worksheet title for A1 notation: `Ben's` → `'Ben''s'`.
#[must_use]
pub fn a1_range(title: &str, cells: &str) -> String {
    format!("'{}'!{cells}", title.replace('\'', "''"))
}

pub struct SheetsClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    auth: TokenProvider,
}

impl SheetsClient {
    /// Creates a client for `spreadsheet_id` against the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        spreadsheet_id: &str,
        auth: TokenProvider,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        Self::with_base_url(spreadsheet_id, auth, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SheetsError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        spreadsheet_id: &str,
        auth: TokenProvider,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("sociallens/0.1 (social-listening)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: spreadsheet_id.to_owned(),
            auth,
        })
    }

    #[must_use]
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// `v4/spreadsheets/<segments...>`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, SheetsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SheetsError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "base URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SheetsError> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status {
                service: "Sheets API",
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Lists the spreadsheet's worksheets keyed by title.
    ///
    /// # Errors
    ///
    /// Returns HTTP, status, or auth errors.
    pub async fn sheets(&self) -> Result<HashMap<String, SheetProperties>, SheetsError> {
        let mut url = self.url(&[self.spreadsheet_id.as_str()])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(sheetId,title)");

        let response = self.send(self.client.get(url)).await?;
        let body: SpreadsheetResponse = response.json().await?;
        Ok(body
            .sheets
            .into_iter()
            .map(|entry| (entry.properties.title.clone(), entry.properties))
            .collect())
    }

    /// Returns the id of worksheet `title`, creating it with the given grid
    /// size if missing. An existing worksheet is resized to the grid.
    ///
    /// # Errors
    ///
    /// Returns HTTP, status, or auth errors.
    pub async fn ensure_sheet(
        &self,
        title: &str,
        rows: usize,
        columns: usize,
    ) -> Result<i64, SheetsError> {
        let grid = json!({ "rowCount": rows, "columnCount": columns });

        if let Some(existing) = self.sheets().await?.remove(title) {
            self.batch_update(vec![json!({
                "updateSheetProperties": {
                    "properties": { "sheetId": existing.sheet_id, "gridProperties": grid },
                    "fields": "gridProperties(rowCount,columnCount)"
                }
            })])
            .await?;
            return Ok(existing.sheet_id);
        }

        let replies = self
            .batch_update(vec![json!({
                "addSheet": { "properties": { "title": title, "gridProperties": grid } }
            })])
            .await?;

        let sheet_id = replies
            .first()
            .and_then(|reply| reply["addSheet"]["properties"]["sheetId"].as_i64())
            .ok_or_else(|| {
                SheetsError::UnexpectedResponse(format!("addSheet reply for '{title}' has no sheetId"))
            })?;
        tracing::info!(title, sheet_id, "created worksheet");
        Ok(sheet_id)
    }

    /// Clears every value in `range` (A1 notation).
    ///
    /// # Errors
    ///
    /// Returns HTTP, status, or auth errors.
    pub async fn clear_values(&self, range: &str) -> Result<(), SheetsError> {
        let url = self.url(&[
            self.spreadsheet_id.as_str(),
            "values",
            format!("{range}:clear").as_str(),
        ])?;
        self.send(self.client.post(url).json(&json!({}))).await?;
        Ok(())
    }

    /// Writes `values` starting at `range`.
    ///
    /// # Errors
    ///
    /// Returns HTTP, status, or auth errors.
    pub async fn update_values(
        &self,
        range: &str,
        values: &[Vec<Value>],
        input: ValueInput,
    ) -> Result<(), SheetsError> {
        let mut url = self.url(&[self.spreadsheet_id.as_str(), "values", range])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", input.as_str());

        let body = json!({ "range": range, "majorDimension": "ROWS", "values": values });
        self.send(self.client.put(url).json(&body)).await?;
        Ok(())
    }

    /// Writes several ranges in one call.
    ///
    /// # Errors
    ///
    /// Returns HTTP, status, or auth errors.
    pub async fn batch_update_values(
        &self,
        data: &[(String, Vec<Vec<Value>>)],
        input: ValueInput,
    ) -> Result<(), SheetsError> {
        let url = self.url(&[self.spreadsheet_id.as_str(), "values:batchUpdate"])?;
        let data: Vec<Value> = data
            .iter()
            .map(|(range, values)| json!({ "range": range, "majorDimension": "ROWS", "values": values }))
            .collect();

        let body = json!({ "valueInputOption": input.as_str(), "data": data });
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    /// Sends structural/formatting requests and returns their replies.
    ///
    /// # Errors
    ///
    /// Returns HTTP, status, or auth errors.
    pub async fn batch_update(&self, requests: Vec<Value>) -> Result<Vec<Value>, SheetsError> {
        let url = self.url(&[format!("{}:batchUpdate", self.spreadsheet_id).as_str()])?;
        let response = self
            .send(self.client.post(url).json(&json!({ "requests": requests })))
            .await?;
        let body: BatchUpdateResponse = response.json().await?;
        Ok(body.replies)
    }
}
