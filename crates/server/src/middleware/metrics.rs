//! Prometheus metrics collection middleware
//!
//! Records `http_requests_total` (counter) and `http_request_duration_seconds`
//! (histogram) for every request, with method/path/status labels.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Normalize request paths to avoid high-cardinality labels.
/// Session ids are caller-chosen strings, so the segment following
/// `Session` is collapsed to `:id`; `$`-operations after it are kept.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    let mut replace_next = false;
    for segment in segments.iter_mut() {
        if replace_next && !segment.is_empty() {
            *segment = ":id";
            replace_next = false;
        } else {
            replace_next = *segment == "Session";
        }
    }
    segments.join("/")
}

/// Middleware that records request count and duration metrics.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn session_ids_are_collapsed() {
        assert_eq!(normalize_path("/fhir/Session"), "/fhir/Session");
        assert_eq!(
            normalize_path("/fhir/Session/PID-2024-001"),
            "/fhir/Session/:id"
        );
        assert_eq!(
            normalize_path("/fhir/Session/PID-2024-001/suggestions"),
            "/fhir/Session/:id/suggestions"
        );
        assert_eq!(
            normalize_path("/fhir/Session/PID-2024-001/$session-bundle"),
            "/fhir/Session/:id/$session-bundle"
        );
        assert_eq!(normalize_path("/health"), "/health");
    }
}
