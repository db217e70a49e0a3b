//! Direct AI suggestion, bypassing the disease store.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use symptomatch_common::{symptoms_from_json, ValidationError};

use crate::error::{ApiError, ApiJson};
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct AiSuggestion {
    pub disease: String,
}

/// POST /api/ai  body `{"symptoms": ["Fever", ...]}`
pub async fn ai_suggest(
    State(state): State<SharedState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<AiSuggestion>, ApiError> {
    let symptoms = symptoms_from_json(body.get("symptoms")).map_err(|e| match e {
        ValidationError::SymptomsRequired => ApiError::BadRequest("No symptoms provided".into()),
        other => other.into(),
    })?;

    let text = state
        .advisor
        .suggest(&symptoms)
        .await
        .map_err(ApiError::internal("AI service failed"))?;
    Ok(Json(AiSuggestion { disease: text }))
}
