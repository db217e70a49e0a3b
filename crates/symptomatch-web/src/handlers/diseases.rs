//! Disease admin: list, create, update, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use symptomatch_common::{Disease, DiseaseDraft, SymptomInput};
use uuid::Uuid;

use crate::error::{ApiError, ApiJson};
use crate::state::SharedState;

/// Create/update body. `symptoms` may be an array or a comma-separated string.
#[derive(Debug, Deserialize)]
pub struct DiseasePayload {
    pub name: Option<String>,
    pub symptoms: Option<SymptomInput>,
    pub description: Option<String>,
}

impl DiseasePayload {
    fn into_draft(self) -> Result<DiseaseDraft, ApiError> {
        Ok(DiseaseDraft::from_optional(self.name, self.symptoms, self.description)?)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

const NOT_FOUND: &str = "Disease not found";

/// A malformed id cannot name any record.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(NOT_FOUND))
}

/// GET /api/diseases
pub async fn list_diseases(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Disease>>, ApiError> {
    let diseases = state
        .db
        .diseases
        .list()
        .await
        .map_err(ApiError::internal("Failed to fetch diseases"))?;
    Ok(Json(diseases))
}

/// POST /api/diseases
pub async fn create_disease(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<DiseasePayload>,
) -> Result<(StatusCode, Json<Disease>), ApiError> {
    let draft = payload.into_draft()?;
    let created = state
        .db
        .diseases
        .insert(draft)
        .await
        .map_err(ApiError::internal("Failed to add disease"))?;

    tracing::info!(id = %created.id, name = %created.name, "Disease created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/diseases/{id}
pub async fn update_disease(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<DiseasePayload>,
) -> Result<Json<Disease>, ApiError> {
    let id = parse_id(&id)?;
    let draft = payload.into_draft()?;

    let updated = state
        .db
        .diseases
        .update(id, draft)
        .await
        .map_err(ApiError::internal("Failed to update disease"))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    tracing::info!(%id, "Disease updated");
    Ok(Json(updated))
}

/// DELETE /api/diseases/{id}
pub async fn delete_disease(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = parse_id(&id)?;

    let deleted = state
        .db
        .diseases
        .delete(id)
        .await
        .map_err(ApiError::internal("Failed to delete disease"))?;
    if !deleted {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    tracing::info!(%id, "Disease deleted");
    Ok(Json(MessageBody { message: "Disease deleted successfully" }))
}
