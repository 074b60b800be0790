//! Validation and refinement endpoints
//!
//! - `POST /api/v1/validate` - merge, refine and validate one draft
//! - `POST /api/v1/refine` - merge and refine only
//!
//! Both accept `{"documentId": "...", "data": {...}}`. A missing
//! `documentId` is replaced by a fresh UUID v4.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;
use wiform_common::FormRecord;

use crate::error::{ApiError, ApiResult};
use crate::refiner::Correction;
use crate::report::{render_text, round1, Completeness, FieldResult};
use crate::AppState;

/// Request body for both endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRequest {
    #[serde(default, alias = "document_id")]
    pub document_id: Option<String>,
    /// Raw extraction draft; a missing draft is treated as `null`
    #[serde(default)]
    pub data: Value,
}

impl FormRequest {
    fn document_id(&self) -> String {
        self.document_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

/// Response format selector
#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>,
}

/// POST /api/v1/validate response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub document_id: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub field_results: BTreeMap<String, FieldResult>,
    pub completeness: Completeness,
    /// One decimal
    pub accuracy_score: f64,
    pub processing_time_ms: f64,
    /// Refined record
    pub data: FormRecord,
    pub corrections: Vec<Correction>,
}

/// POST /api/v1/refine response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    pub document_id: String,
    /// Refined record
    pub data: FormRecord,
    pub corrections: Vec<Correction>,
}

/// POST /api/v1/validate
///
/// `?format=text` returns the human-readable report as `text/plain`.
pub async fn validate(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    payload: Result<Json<FormRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let as_text = match query.format.as_deref() {
        None | Some("json") => false,
        Some("text") => true,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "Unsupported format '{other}' (expected json or text)"
            )))
        }
    };

    let Json(request) = payload?;
    let document_id = request.document_id();
    info!(document_id = %document_id, "Validation request received");

    let engine = Arc::clone(&state.engine);
    let data = request.data;
    let start = Instant::now();
    let output = tokio::task::spawn_blocking(move || engine.process(&data)).await?;
    let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        document_id = %document_id,
        valid = output.report.valid,
        errors = output.report.errors.len(),
        warnings = output.report.warnings.len(),
        corrections = output.corrections.len(),
        accuracy_score = output.accuracy_score,
        processing_time_ms,
        "Validation request completed"
    );

    if as_text {
        let text = render_text(&output.report);
        return Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response());
    }

    let report = output.report;
    Ok(Json(ValidateResponse {
        document_id,
        valid: report.valid,
        errors: report.errors,
        warnings: report.warnings,
        field_results: report.field_results,
        completeness: report.completeness,
        accuracy_score: round1(output.accuracy_score),
        processing_time_ms,
        data: output.record,
        corrections: output.corrections,
    })
    .into_response())
}

/// POST /api/v1/refine
pub async fn refine(
    State(state): State<AppState>,
    payload: Result<Json<FormRequest>, JsonRejection>,
) -> ApiResult<Json<RefineResponse>> {
    let Json(request) = payload?;
    let document_id = request.document_id();

    let engine = Arc::clone(&state.engine);
    let data = request.data;
    let (refined, merge_warnings) =
        tokio::task::spawn_blocking(move || engine.refine_draft(&data)).await?;
    info!(
        document_id = %document_id,
        corrections = refined.corrections.len(),
        merge_warnings = merge_warnings.len(),
        "Refinement request completed"
    );

    Ok(Json(RefineResponse {
        document_id,
        data: refined.record,
        corrections: refined.corrections,
    }))
}

/// Build validation routes
pub fn validate_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/validate", post(validate))
        .route("/api/v1/refine", post(refine))
}
