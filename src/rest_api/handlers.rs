//! HTTP handlers for the REST API

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use tracing::instrument;

use crate::report::ReportError;

use super::dto::{
    EmissionQuery, ErrorResponse, HealthResponse, ReportResponse, RENDER_FAILED_MESSAGE,
    REPORT_UPLOADED_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
use super::server::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Health check endpoint
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Generate an emission report for an activity and upload it
#[instrument(skip_all, fields(activity = %activity))]
pub async fn get_emissions(
    State(state): State<Arc<AppState>>,
    Path(activity): Path<String>,
    query: Result<Query<EmissionQuery>, QueryRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(rejection.body_text())),
        )
    })?;
    let usage_value = query.usage_value.unwrap_or(0.0);

    match state
        .generator
        .generate(&activity, usage_value, Local::now())
        .await
    {
        Ok(report) => Ok(Json(ReportResponse {
            message: REPORT_UPLOADED_MESSAGE.to_string(),
            file_name: report.file_name,
        })),
        Err(e @ ReportError::InvalidUsage) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )),
        // Details were already logged by the generator
        Err(ReportError::Render(_)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(RENDER_FAILED_MESSAGE)),
        )),
        Err(ReportError::Upload(_)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(UPLOAD_FAILED_MESSAGE)),
        )),
    }
}

/// Metrics endpoint handler
#[cfg(feature = "metrics")]
pub async fn metrics() -> Result<String, StatusCode> {
    crate::metrics::encode_metrics().map_err(|e| {
        tracing::error!("Failed to encode metrics: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
