use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use myeloma_core::models::diagnostic::Diagnostic;
use myeloma_engine::payload::DiagnosticsPayload;
use myeloma_rules::criteria::CriteriaOutcome;
use myeloma_rules::next_tests::NextTests;
use myeloma_rules::staging::Staging;

use super::patient_body;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn submit_diagnostics(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    body: Bytes,
) -> Result<Json<CriteriaOutcome>, ApiError> {
    let outcome = state
        .run(move |engine| {
            let payload: DiagnosticsPayload = patient_body(engine, &patient_id, &body)?;
            engine.submit_diagnostics(&patient_id, payload)
        })
        .await?;
    Ok(Json(outcome))
}

pub async fn list_diagnostics(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Diagnostic>>, ApiError> {
    let records = state
        .run(move |engine| engine.diagnostics(&patient_id))
        .await?;
    Ok(Json(records))
}

pub async fn next_tests(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<NextTests>, ApiError> {
    let next = state.run(move |engine| engine.next_tests(&patient_id)).await?;
    Ok(Json(next))
}

pub async fn staging(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Staging>, ApiError> {
    let staging = state.run(move |engine| engine.staging(&patient_id)).await?;
    Ok(Json(staging))
}
