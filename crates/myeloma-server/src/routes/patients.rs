use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use myeloma_core::models::patient::Patient;
use myeloma_engine::payload::{self, NewPatient, ProfileUpdate};
use myeloma_rules::criteria::CriteriaOutcome;

use super::patient_body;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn register_patient(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = state
        .run(move |engine| {
            let new: NewPatient = payload::parse_slice(&body)?;
            engine.register_patient(new)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.run(move |engine| engine.patient(&patient_id)).await?;
    Ok(Json(patient))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .run(move |engine| engine.delete_patient(&patient_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Overwrite clinical fields and return the recomputed SLiM-CRAB outcome.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    body: Bytes,
) -> Result<Json<CriteriaOutcome>, ApiError> {
    let outcome = state
        .run(move |engine| {
            let update: ProfileUpdate = patient_body(engine, &patient_id, &body)?;
            engine.update_patient_profile(&patient_id, update)
        })
        .await?;
    Ok(Json(outcome))
}
