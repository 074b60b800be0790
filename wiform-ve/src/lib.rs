//! wiform-ve library - form repair & validation engine
//!
//! Turns noisy, language-model-extracted drafts of National Insurance form
//! 283 into a schema-conformant, cross-validated record with a completeness
//! and accuracy signal.
//!
//! Data flow: raw draft → [`merger`] → [`refiner`] → [`validators`] →
//! [`report::ValidationReport`], orchestrated by [`engine::FormEngine`].

pub mod api;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod logging;
pub mod merger;
pub mod refiner;
pub mod report;
pub mod validators;

pub use crate::engine::{EngineOutput, FormEngine};
pub use crate::error::{ApiError, ApiResult};
pub use crate::report::ValidationReport;

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared, stateless processing engine
    pub engine: Arc<FormEngine>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(engine: Arc<FormEngine>) -> Self {
        Self {
            engine,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::validate_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
