//! Symptom analysis: stored diseases first, AI suggestion on miss.

use axum::{extract::State, Json};
use serde_json::Value;
use symptomatch_analysis::Analysis;
use symptomatch_common::symptoms_from_json;

use crate::error::{ApiError, ApiJson};
use crate::state::SharedState;

/// POST /api/analyze  body `{"symptoms": ["Fever", ...]}`
pub async fn analyze(
    State(state): State<SharedState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Analysis>, ApiError> {
    let symptoms = symptoms_from_json(body.get("symptoms"))?;
    let analysis = state.orchestrator.analyze(&symptoms).await?;
    Ok(Json(analysis))
}
