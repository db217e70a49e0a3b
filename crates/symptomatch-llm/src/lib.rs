//! symptomatch-llm — generative text backends and the symptom advisor
//! used as the fallback when no stored disease matches.

pub mod backend;
pub mod advisor;
pub mod audit;

pub use advisor::SymptomAdvisor;
pub use backend::{build_backend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message};
