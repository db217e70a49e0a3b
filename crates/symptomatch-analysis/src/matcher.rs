//! Exact, case-sensitive symptom intersection against the disease store.

use std::sync::Arc;

use symptomatch_common::{normalize_symptoms, Disease, ValidationError};
use symptomatch_db::DiseaseStore;

use crate::error::AnalyzeError;

#[derive(Clone)]
pub struct SymptomMatcher {
    store: Arc<dyn DiseaseStore>,
}

impl SymptomMatcher {
    pub fn new(store: Arc<dyn DiseaseStore>) -> Self {
        Self { store }
    }

    /// Every stored disease sharing at least one symptom with `symptoms`.
    ///
    /// Tokens are compared verbatim: no trimming, no case folding. A list
    /// with no non-blank token is rejected. An empty result is a normal
    /// outcome; store failures are returned as errors.
    pub async fn find_matches(&self, symptoms: &[String]) -> Result<Vec<Disease>, AnalyzeError> {
        if normalize_symptoms(symptoms).is_empty() {
            return Err(ValidationError::SymptomsRequired.into());
        }

        let matches = self.store.find_by_any_symptom(symptoms).await.map_err(|e| {
            tracing::error!(backend = self.store.backend_name(), error = %e, "Symptom lookup failed");
            e
        })?;

        tracing::debug!(query = ?symptoms, matches = matches.len(), "Symptom lookup complete");
        Ok(matches)
    }
}
