use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Logs one structured line per request: the matched route template, the
/// patient the request addresses (if any), status and latency.
pub async fn request_log(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let patient_id = patient_id_from_path(req.uri().path()).map(str::to_string);

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(
            method = %method,
            route = %route,
            patient_id = patient_id.as_deref(),
            status = status.as_u16(),
            elapsed_ms,
            "api_request"
        );
    } else {
        tracing::info!(
            method = %method,
            route = %route,
            patient_id = patient_id.as_deref(),
            status = status.as_u16(),
            elapsed_ms,
            "api_request"
        );
    }

    response
}

/// The `{patient_id}` segment of a `/patients/{patient_id}/...` path.
pub fn patient_id_from_path(path: &str) -> Option<&str> {
    let mut segments = path.trim_start_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some("patients"), Some(id)) if !id.is_empty() => Some(id),
        _ => None,
    }
}
