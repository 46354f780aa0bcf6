use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use myeloma_core::models::monitoring::Monitoring;
use myeloma_engine::MonitoringDirective;
use myeloma_engine::payload::MonitoringPayload;

use super::patient_body;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn submit_monitoring(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<MonitoringDirective>), ApiError> {
    let directive = state
        .run(move |engine| {
            let payload: MonitoringPayload = patient_body(engine, &patient_id, &body)?;
            engine.submit_monitoring(&patient_id, payload)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(directive)))
}

pub async fn list_monitoring(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Monitoring>>, ApiError> {
    let records = state
        .run(move |engine| engine.monitoring(&patient_id))
        .await?;
    Ok(Json(records))
}
