//! Analyze orchestration: database match first, AI suggestion on miss.

use std::sync::Arc;

use serde::Serialize;
use symptomatch_common::{normalize_symptoms, Disease, ValidationError};
use symptomatch_llm::SymptomAdvisor;

use crate::error::AnalyzeError;
use crate::matcher::SymptomMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Database,
    Ai,
}

/// Outcome of one analyze request, tagged by where the answer came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum MatchResult {
    /// `disease` is the first match in store order; `matches` holds all of them.
    Database { disease: Disease, matches: Vec<Disease> },
    Ai { suggestion: String },
}

impl MatchResult {
    pub fn source(&self) -> MatchSource {
        match self {
            MatchResult::Database { .. } => MatchSource::Database,
            MatchResult::Ai { .. } => MatchSource::Ai,
        }
    }
}

/// Wire shape of `POST /api/analyze`:
/// `{"source": "database" | "ai", "diseaseFound": bool, ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(rename = "diseaseFound")]
    pub disease_found: bool,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl Analysis {
    fn from_result(result: MatchResult) -> Self {
        Self { disease_found: result.source() == MatchSource::Database, result }
    }
}

/// Runs the two-step chain. Holds injected handles only; no per-request state.
#[derive(Clone)]
pub struct AnalyzeOrchestrator {
    matcher: SymptomMatcher,
    advisor: Arc<SymptomAdvisor>,
}

impl AnalyzeOrchestrator {
    pub fn new(matcher: SymptomMatcher, advisor: Arc<SymptomAdvisor>) -> Self {
        Self { matcher, advisor }
    }

    pub async fn analyze(&self, symptoms: &[String]) -> Result<Analysis, AnalyzeError> {
        if normalize_symptoms(symptoms).is_empty() {
            tracing::debug!(state = "validation_failed", "Rejected empty symptom list");
            return Err(ValidationError::SymptomsRequired.into());
        }

        tracing::debug!(state = "matching", count = symptoms.len());
        let matches = self.matcher.find_matches(symptoms).await?;

        if let Some(disease) = matches.first().cloned() {
            tracing::info!(
                disease = %disease.name,
                total_matches = matches.len(),
                "Symptoms matched a stored disease"
            );
            return Ok(Analysis::from_result(MatchResult::Database { disease, matches }));
        }

        tracing::info!(state = "falling_back", "No stored disease matched, asking AI");
        let suggestion = self.advisor.suggest(symptoms).await?;
        tracing::debug!(state = "ai_complete");

        Ok(Analysis::from_result(MatchResult::Ai { suggestion }))
    }
}
