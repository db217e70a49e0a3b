//! Shared application state for the web server.

use std::sync::Arc;

use symptomatch_analysis::{AnalyzeOrchestrator, SymptomMatcher};
use symptomatch_db::Database;
use symptomatch_llm::SymptomAdvisor;

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub advisor: Arc<SymptomAdvisor>,
    pub orchestrator: AnalyzeOrchestrator,
}

impl AppState {
    pub fn new(db: Database, advisor: Arc<SymptomAdvisor>) -> Self {
        let orchestrator = AnalyzeOrchestrator::new(
            SymptomMatcher::new(db.diseases.clone()),
            advisor.clone(),
        );
        Self { db, advisor, orchestrator }
    }
}

pub type SharedState = Arc<AppState>;
