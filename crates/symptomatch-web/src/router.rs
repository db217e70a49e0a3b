//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    ai::ai_suggest,
    analyze::analyze,
    diseases::{create_disease, delete_disease, list_diseases, update_disease},
    health::health,
    symptoms::search_symptoms,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/api/health",        get(health))
        .route("/api/diseases",      get(list_diseases).post(create_disease))
        .route("/api/diseases/{id}", put(update_disease).delete(delete_disease))
        .route("/api/symptoms",      get(search_symptoms))
        .route("/api/analyze",       post(analyze))
        .route("/api/ai",            post(ai_suggest))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
