//! symptomatch-common — Shared types and validation used across all Symptomatch crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{Disease, DiseaseDraft, Symptom, SymptomInput, normalize_symptoms, symptoms_from_json};
pub use error::{ValidationError, Result};
