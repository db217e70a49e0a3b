//! Audit records for LLM calls.
//!
//! The generated text itself is never logged, only its SHA-256 digest.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::backend::LlmResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmAuditEntry {
    pub id: Uuid,
    pub model: String,
    pub backend: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub output_hash: String,
    pub latency_ms: u64,
    pub called_at: chrono::DateTime<Utc>,
}

impl LlmAuditEntry {
    pub fn new(backend: &str, response: &LlmResponse, latency_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: response.model.clone(),
            backend: backend.to_string(),
            prompt_tokens: response.prompt_tokens,
            completion_tokens: response.completion_tokens,
            output_hash: sha256_hex(&response.content),
            latency_ms,
            called_at: Utc::now(),
        }
    }

    /// Emit this entry as a structured `info` event.
    pub fn record(&self) {
        tracing::info!(
            audit_id = %self.id,
            model = %self.model,
            backend = %self.backend,
            prompt_tokens = self.prompt_tokens,
            completion_tokens = self.completion_tokens,
            output_hash = %self.output_hash,
            latency_ms = self.latency_ms,
            "LLM call completed"
        );
    }
}

pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_hashes_output_instead_of_storing_it() {
        let response = LlmResponse {
            content: "Possibly migraine.".to_string(),
            model: "gemini-1.5-flash".to_string(),
            prompt_tokens: 20,
            completion_tokens: 5,
        };
        let entry = LlmAuditEntry::new("gemini", &response, 42);

        assert_eq!(entry.output_hash.len(), 64);
        assert_eq!(entry.output_hash, sha256_hex("Possibly migraine."));
        assert!(!serde_json::to_string(&entry).unwrap().contains("migraine"));
    }
}
