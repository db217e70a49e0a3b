//! symptomatch-analysis — symptom-to-disease matching and the AI fallback policy.
//!
//! `AnalyzeOrchestrator::analyze` is the single decision point:
//!   1. query the store for diseases sharing a symptom
//!   2. any match  → database-sourced result (first match + all matches)
//!   3. no match   → AI-sourced suggestion
//!
//! A store failure aborts before the AI is consulted; an AI failure is
//! reported as its own error, never as "no match".

pub mod error;
pub mod matcher;
pub mod orchestrator;

pub use error::AnalyzeError;
pub use matcher::SymptomMatcher;
pub use orchestrator::{Analysis, AnalyzeOrchestrator, MatchResult, MatchSource};
