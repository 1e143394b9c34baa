//! Session resource HTTP handlers
//!
//! The session surface covers intake, suggestion lookup, diagnosis
//! acceptance, and the two export operations.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use setu_core::{
    AcceptedDiagnosis, Bundle, DiagnosisEntry, PatientRecord, Session, documents, matcher,
};

use crate::AppState;
use crate::error::AppError;

/// Request body for starting a session
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    pub name: String,
    pub age: u32,
    pub id: String,
}

/// Request body for accepting a diagnosis
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest {
    pub diagnosis_id: u32,
}

/// Query parameters for suggestion lookup
#[derive(Debug, Deserialize, Default)]
pub struct SuggestParams {
    pub query: Option<String>,
}

/// Query parameters for the dual-coding export
#[derive(Debug, Deserialize)]
pub struct DualCodingParams {
    pub diagnosis: u32,
}

/// POST /fhir/Session - Start a patient session
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<IntakeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patient = PatientRecord::new(&body.name, body.age, &body.id)?;
    let id = patient.id().to_owned();
    state.sessions.create(patient)?;

    tracing::info!(session = %id, "Session started");

    let mut headers = HeaderMap::new();
    // Patient ids are caller-chosen; skip the header rather than fail if one
    // is not representable.
    if let Ok(location) = format!("/fhir/Session/{id}").parse() {
        headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers))
}

/// GET /fhir/Session/{id} - Read the active patient and history
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Session>, AppError> {
    state
        .sessions
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Session/{id} not found")))
}

/// DELETE /fhir/Session/{id} - End a session, discarding its state
pub async fn end(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.end(&id) {
        tracing::info!(session = %id, "Session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session/{id} not found")))
    }
}

/// GET /fhir/Session/{id}/suggestions - Match free text against the catalog
///
/// A blank or missing query is not an error; it yields an empty list.
pub async fn suggestions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<Vec<DiagnosisEntry>>, AppError> {
    if state.sessions.get(&id).is_none() {
        return Err(AppError::NotFound(format!("Session/{id} not found")));
    }

    let query = params.query.unwrap_or_default();
    let hits: Vec<DiagnosisEntry> = matcher::suggest(&query, state.catalog.entries())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(hits))
}

/// POST /fhir/Session/{id}/diagnoses - Accept a diagnosis into the record
pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AcceptRequest>,
) -> Result<(StatusCode, Json<AcceptedDiagnosis>), AppError> {
    let entry = state.catalog.get(body.diagnosis_id).cloned().ok_or_else(|| {
        AppError::NotFound(format!(
            "Diagnosis {} not found in catalog",
            body.diagnosis_id
        ))
    })?;

    let accepted = state.sessions.accept(&id, entry, Utc::now())?;

    tracing::info!(
        session = %id,
        diagnosis = accepted.entry.id,
        namaste = %accepted.entry.namaste_code,
        icd11 = %accepted.entry.icd11_code,
        "Diagnosis accepted"
    );

    Ok((StatusCode::CREATED, Json(accepted)))
}

/// GET /fhir/Session/{id}/$dual-coding - Bundle for one selected diagnosis
pub async fn dual_coding(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DualCodingParams>,
) -> Result<Json<Bundle>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session/{id} not found")))?;

    let entry = state.catalog.get(params.diagnosis).ok_or_else(|| {
        AppError::NotFound(format!("Diagnosis {} not found in catalog", params.diagnosis))
    })?;

    let bundle = documents::dual_coding_bundle(session.patient(), entry, Utc::now());
    Ok(Json(bundle))
}

/// GET /fhir/Session/{id}/$session-bundle - Bundle for the whole session
///
/// An empty history is a normal state: the builder produces nothing, and the
/// response says so instead of returning an empty document.
pub async fn export_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bundle>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session/{id} not found")))?;

    documents::session_bundle(Some(session.patient()), session.history(), Utc::now())
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No diagnoses recorded for Session/{id}; no bundle was produced"
            ))
        })
}
