//! # Report Route
//!
//! Single aggregate summary over a date range: count, average and total
//! duration of matching sessions.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::db::types::{Report, ReportRequest};

use super::errors::{ApiError, ApiResult};
use super::ApiState;

pub fn report_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/report", post(report))
        .with_state(state)
}

async fn report(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> ApiResult<Json<Report>> {
    let Json(request) = body?;

    // The id fields fall back to "match everything" when absent; the date
    // bounds have no fallback since BETWEEN needs both.
    let start_date = request
        .start_date
        .as_deref()
        .ok_or(ApiError::MissingField("start_date"))?;
    let end_date = request
        .end_date
        .as_deref()
        .ok_or(ApiError::MissingField("end_date"))?;

    let report = state
        .store
        .report(request.tutor_id, request.subject_id, start_date, end_date)?;
    Ok(Json(report))
}
