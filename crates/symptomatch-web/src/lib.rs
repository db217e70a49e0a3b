//! symptomatch-web — JSON API for Symptomatch
//! Provides:
//!   - Disease admin (list, create, update, delete)
//!   - Symptom autocomplete
//!   - Symptom analysis with AI fallback
//!   - Direct AI suggestion
//!   - Health check

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod telemetry;
