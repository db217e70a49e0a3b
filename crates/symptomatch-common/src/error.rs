use thiserror::Error;

/// Request-level validation failures. Every variant maps to HTTP 400.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name, symptoms, and description are required")]
    MissingDiseaseFields,

    #[error("Symptoms array is required")]
    SymptomsRequired,

    #[error("Symptoms must be strings, got {0}")]
    InvalidSymptom(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
