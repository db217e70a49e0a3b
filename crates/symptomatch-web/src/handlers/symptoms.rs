//! Symptom autocomplete.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use symptomatch_common::Symptom;

use crate::error::ApiError;
use crate::state::SharedState;

pub const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Deserialize, Default)]
pub struct SymptomQuery {
    #[serde(default)]
    pub query: String,
}

/// GET /api/symptoms?query=<substring>
pub async fn search_symptoms(
    State(state): State<SharedState>,
    Query(params): Query<SymptomQuery>,
) -> Result<Json<Vec<Symptom>>, ApiError> {
    let hits = state
        .db
        .symptoms
        .search(params.query.trim(), SEARCH_LIMIT)
        .await
        .map_err(ApiError::internal("Failed to fetch symptoms"))?;
    Ok(Json(hits))
}
