//! Default data set loaded by the seed binary and by in-memory startup.

use symptomatch_common::DiseaseDraft;

use crate::database::Database;
use crate::error::Result;

/// `(name, symptoms, description)` rows of the default disease set.
pub const DEFAULT_DISEASES: &[(&str, &[&str], &str)] = &[
    ("Flu", &["Fever", "Cough", "Body Ache"], "Common viral infection."),
    ("Cold", &["Sneezing", "Runny Nose"], "Mild respiratory infection."),
];

pub const DEFAULT_SYMPTOMS: &[&str] = &["Fever", "Cough", "Body Ache", "Sneezing", "Runny Nose"];

pub fn default_disease_drafts() -> Vec<DiseaseDraft> {
    DEFAULT_DISEASES
        .iter()
        .filter_map(|(name, symptoms, description)| {
            DiseaseDraft::new(*name, *symptoms, *description).ok()
        })
        .collect()
}

/// Counts of records written by [`seed_defaults`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub diseases: usize,
    pub symptoms: usize,
}

/// Replace both collections with the default data set.
pub async fn seed_defaults(db: &Database) -> Result<SeedReport> {
    let diseases = db.diseases.replace_all(default_disease_drafts()).await?;
    let symptoms = db
        .symptoms
        .replace_all(DEFAULT_SYMPTOMS.iter().map(|s| s.to_string()).collect())
        .await?;

    tracing::info!(
        backend = db.diseases.backend_name(),
        diseases = diseases.len(),
        symptoms = symptoms.len(),
        "Seeded default data"
    );

    Ok(SeedReport { diseases: diseases.len(), symptoms: symptoms.len() })
}
