//! Integration tests for the dual-coding session service.
//!
//! These tests build the full Axum router over the embedded catalog and an
//! in-memory session store, and exercise the HTTP endpoints with oneshot
//! requests. No external services are involved.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

use setu_server::{AppState, config::Config};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the app router with test configuration.
fn test_app() -> Router {
    let config = Config {
        bind_address: "0.0.0.0:0".to_string(),
        cors_origins: vec!["*".to_string()],
        rate_limit_rps: 1000,
    };
    setu_server::build_app(AppState::new(), &config)
}

/// Send a request to the app and return (status, body as JSON).
async fn request(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.clone().oneshot(req).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };

    (status, body)
}

/// Build a GET request.
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a POST request with JSON body.
fn post(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

/// Build a DELETE request.
fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper: start a session and assert the Location header points at it.
async fn start_session(app: &Router, name: &str, age: u32, id: &str) {
    let response = app
        .clone()
        .oneshot(post(
            "/fhir/Session",
            json!({"name": name, "age": age, "id": id}),
        ))
        .await
        .expect("Intake request failed");

    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get("Location")
        .expect("Missing Location header")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, format!("/fhir/Session/{id}"));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_metadata() {
    let app = test_app();

    let (status, body) = request(&app, get("/metadata")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resourceType"], "CapabilityStatement");
    assert_eq!(body["fhirVersion"], "4.0.1");
    assert_eq!(body["status"], "active");
    assert_eq!(body["rest"][0]["resource"][0]["type"], "Session");
}

#[tokio::test]
async fn test_health() {
    let app = test_app();

    let (status, body) = request(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["catalogEntries"].as_u64().unwrap() > 0);
    assert_eq!(body["activeSessions"], 0);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = test_app();

    // 1. Intake
    start_session(&app, "Arjun Sharma", 45, "PID-2024-001").await;

    // 2. Read back
    let (status, body) = request(&app, get("/fhir/Session/PID-2024-001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient"]["name"], "Arjun Sharma");
    assert_eq!(body["patient"]["age"], 45);
    assert_eq!(body["history"], json!([]));

    // 3. Suggestions
    let (status, body) = request(
        &app,
        get("/fhir/Session/PID-2024-001/suggestions?query=jwara"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["namasteCode"], "NAM001");
    assert_eq!(body[0]["icd11Code"], "MG26");

    // 4. Accept the suggestion
    let (status, body) = request(
        &app,
        post("/fhir/Session/PID-2024-001/diagnoses", json!({"diagnosisId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["term"], "Jwara (Fever)");
    assert!(body["timestamp"].is_string());

    // 5. Dual-coding bundle for the selected diagnosis
    let (status, body) = request(
        &app,
        get("/fhir/Session/PID-2024-001/$dual-coding?diagnosis=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resourceType"], "Bundle");
    assert_eq!(body["type"], "collection");
    assert_eq!(body["id"], "bundle-PID-2024-001-1");
    assert_eq!(body["entry"].as_array().unwrap().len(), 2);
    assert_eq!(body["entry"][0]["resource"]["resourceType"], "Patient");
    assert_eq!(body["entry"][1]["resource"]["resourceType"], "ConceptMap");
    assert_eq!(
        body["entry"][1]["resource"]["group"][0]["element"][0]["code"],
        "NAM001"
    );
    assert_eq!(
        body["entry"][1]["resource"]["group"][0]["element"][0]["target"][0]["code"],
        "MG26"
    );

    // 6. Whole-session bundle: patient + one condition
    let (status, body) = request(&app, get("/fhir/Session/PID-2024-001/$session-bundle")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"].as_array().unwrap().len(), 2);
    let condition = &body["entry"][1]["resource"];
    assert_eq!(condition["resourceType"], "Condition");
    assert_eq!(condition["subject"]["reference"], "Patient/PID-2024-001");
    assert_eq!(condition["clinicalStatus"]["coding"][0]["code"], "active");
    assert_eq!(
        condition["verificationStatus"]["coding"][0]["code"],
        "confirmed"
    );
    assert_eq!(condition["code"]["coding"].as_array().unwrap().len(), 2);

    // 7. End the session
    let (status, _) = request(&app, delete("/fhir/Session/PID-2024-001")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // 8. Read after end → 404 with an OperationOutcome
    let (status, body) = request(&app, get("/fhir/Session/PID-2024-001")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["resourceType"], "OperationOutcome");
}

#[tokio::test]
async fn test_intake_rejects_blank_fields() {
    let app = test_app();

    let (status, body) = request(
        &app,
        post("/fhir/Session", json!({"name": "   ", "age": 30, "id": "P1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["resourceType"], "OperationOutcome");
    assert_eq!(body["issue"][0]["code"], "invalid");

    let (status, _) = request(
        &app,
        post("/fhir/Session", json!({"name": "Meera", "age": 30, "id": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_intake_rejects_negative_age() {
    let app = test_app();

    // Negative age fails JSON deserialization before the handler runs.
    let (status, _) = request(
        &app,
        post("/fhir/Session", json!({"name": "Meera", "age": -5, "id": "P1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_duplicate_session_is_a_conflict() {
    let app = test_app();

    start_session(&app, "Meera Nair", 34, "P1").await;

    let (status, body) = request(
        &app,
        post("/fhir/Session", json!({"name": "Someone Else", "age": 50, "id": "P1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["issue"][0]["code"], "conflict");
}

#[tokio::test]
async fn test_suggestions_blank_and_unmatched_queries() {
    let app = test_app();

    start_session(&app, "Meera Nair", 34, "P2").await;

    // Missing query → empty list, not an error
    let (status, body) = request(&app, get("/fhir/Session/P2/suggestions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // Whitespace-only query → empty list
    let (status, body) = request(&app, get("/fhir/Session/P2/suggestions?query=%20%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // Unmatched query → empty list
    let (status, body) = request(&app, get("/fhir/Session/P2/suggestions?query=xyz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // Unknown session → 404
    let (status, _) = request(&app, get("/fhir/Session/nobody/suggestions?query=jwara")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggestions_match_codes_in_catalog_order() {
    let app = test_app();

    start_session(&app, "Meera Nair", 34, "P3").await;

    // "nam0" is a substring of every NAMASTE code; results must come back in
    // catalog order.
    let (status, body) = request(&app, get("/fhir/Session/P3/suggestions?query=nam0")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_u64().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert!(ids.len() >= 10);
}

#[tokio::test]
async fn test_accept_unknown_diagnosis() {
    let app = test_app();

    start_session(&app, "Meera Nair", 34, "P4").await;

    let (status, body) = request(
        &app,
        post("/fhir/Session/P4/diagnoses", json!({"diagnosisId": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["resourceType"], "OperationOutcome");
}

#[tokio::test]
async fn test_empty_session_export_produces_no_document() {
    let app = test_app();

    start_session(&app, "Meera Nair", 34, "P5").await;

    let (status, body) = request(&app, get("/fhir/Session/P5/$session-bundle")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["resourceType"], "OperationOutcome");
    let diagnostics = body["issue"][0]["diagnostics"].as_str().unwrap();
    assert!(diagnostics.contains("No diagnoses recorded"));
}

#[tokio::test]
async fn test_dual_coding_requires_session() {
    let app = test_app();

    let (status, _) = request(&app, get("/fhir/Session/nobody/$dual-coding?diagnosis=1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_accumulates_most_recent_first() {
    let app = test_app();

    start_session(&app, "Arjun Sharma", 45, "P6").await;

    for diagnosis_id in [1, 5] {
        let (status, _) = request(
            &app,
            post("/fhir/Session/P6/diagnoses", json!({"diagnosisId": diagnosis_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = request(&app, get("/fhir/Session/P6")).await;
    assert_eq!(status, StatusCode::OK);
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["id"], 5);
    assert_eq!(history[1]["id"], 1);

    // Session bundle holds the patient plus one condition per history item
    let (status, body) = request(&app, get("/fhir/Session/P6/$session-bundle")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"].as_array().unwrap().len(), 3);
    assert_eq!(body["entry"][1]["resource"]["id"], "condition-P6-0");
    assert_eq!(body["entry"][2]["resource"]["id"], "condition-P6-1");
}
