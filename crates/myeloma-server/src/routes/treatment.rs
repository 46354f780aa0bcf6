use axum::Json;
use axum::extract::{Path, Query, State};
use myeloma_rules::treatment::TreatmentPlan;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FrameworkQuery {
    pub framework: Option<String>,
}

/// Unrecognised framework selectors fall back to the consensus rules.
pub async fn treatment_recommendations(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(query): Query<FrameworkQuery>,
) -> Result<Json<TreatmentPlan>, ApiError> {
    let plan = state
        .run(move |engine| {
            engine.treatment_recommendations(&patient_id, query.framework.as_deref())
        })
        .await?;
    Ok(Json(plan))
}
