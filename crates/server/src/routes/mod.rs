mod session;

pub mod health;
pub mod metadata;
pub mod metrics;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

/// Build FHIR routes
pub fn fhir_routes() -> Router<AppState> {
    Router::new()
        .route("/Session", post(session::create))
        .route("/Session/{id}", get(session::read).delete(session::end))
        .route("/Session/{id}/suggestions", get(session::suggestions))
        .route("/Session/{id}/diagnoses", post(session::accept))
        .route("/Session/{id}/$dual-coding", get(session::dual_coding))
        .route("/Session/{id}/$session-bundle", get(session::export_session))
}
