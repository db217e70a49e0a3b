use symptomatch_common::ValidationError;
use symptomatch_db::DbError;
use symptomatch_llm::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Disease store query failed: {0}")]
    Store(#[from] DbError),

    #[error("AI service failed: {0}")]
    AiService(#[from] LlmError),
}
