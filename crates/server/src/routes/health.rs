//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    catalog_entries: usize,
    active_sessions: usize,
}

/// GET /health - Report liveness plus catalog and session counts
///
/// There is no backing store to probe; the service is healthy as long as the
/// embedded catalog is loaded.
pub async fn check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            catalog_entries: state.catalog.len(),
            active_sessions: state.sessions.active_count(),
        }),
    )
}
