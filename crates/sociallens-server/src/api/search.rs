use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use sociallens_core::BrandQuery;
use sociallens_pipeline::SearchError;

use crate::middleware::RequestId;

use super::{ApiError, AppState, REPORT_STATUS_HEADER};

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = BrandQuery::parse(&brand_name)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    tracing::info!(request_id = %req_id.0, brand = query.name(), "search requested");

    let report = state
        .pipeline
        .run(&query)
        .await
        .map_err(|e| map_search_error(&req_id, query.name(), &e))?;

    let report_status = if report.persistence.is_ok() {
        "ok"
    } else {
        "failed"
    };
    Ok((
        [(REPORT_STATUS_HEADER, report_status)],
        Json(report.result),
    ))
}

fn map_search_error(req_id: &RequestId, brand: &str, error: &SearchError) -> ApiError {
    match error {
        SearchError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, error.to_string()),
        SearchError::Collect(_) | SearchError::Process(_) => {
            tracing::error!(request_id = %req_id.0, brand, error = %error, "search failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}
