//! `batchUpdate` request bodies for worksheet styling.

use serde_json::{json, Value};

use crate::layout::Rgb;

fn grid_range(sheet_id: i64, row: usize, columns: (usize, usize)) -> Value {
    json!({
        "sheetId": sheet_id,
        "startRowIndex": row,
        "endRowIndex": row + 1,
        "startColumnIndex": columns.0,
        "endColumnIndex": columns.1,
    })
}

/// Apply `text_format` to columns `[start, end)` of zero-based `row`.
#[must_use]
pub fn text_format(sheet_id: i64, row: usize, columns: (usize, usize), text_format: &Value) -> Value {
    json!({
        "repeatCell": {
            "range": grid_range(sheet_id, row, columns),
            "cell": { "userEnteredFormat": { "textFormat": text_format } },
            "fields": "userEnteredFormat.textFormat",
        }
    })
}

#[must_use]
pub fn bold_row(sheet_id: i64, row: usize, columns: usize) -> Value {
    text_format(sheet_id, row, (0, columns), &json!({ "bold": true }))
}

#[must_use]
pub fn background(sheet_id: i64, row: usize, column: usize, color: Rgb) -> Value {
    json!({
        "repeatCell": {
            "range": grid_range(sheet_id, row, (column, column + 1)),
            "cell": {
                "userEnteredFormat": {
                    "backgroundColor": {
                        "red": color.red,
                        "green": color.green,
                        "blue": color.blue,
                    }
                }
            },
            "fields": "userEnteredFormat.backgroundColor",
        }
    })
}

#[must_use]
pub fn freeze_rows(sheet_id: i64, rows: usize) -> Value {
    json!({
        "updateSheetProperties": {
            "properties": { "sheetId": sheet_id, "gridProperties": { "frozenRowCount": rows } },
            "fields": "gridProperties.frozenRowCount",
        }
    })
}
