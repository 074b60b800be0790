//! `GET /health`
//!
//! Liveness plus the active refinement rules, so a deployment can confirm
//! which optional rules its config switched on.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the handler answers
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    /// Refinement rules in execution order
    pub rules: Vec<&'static str>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .try_into()
        .unwrap_or(0);

    Json(HealthResponse {
        status: "ok",
        module: "wiform-ve",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        rules: state.engine.refiner().rule_names(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
