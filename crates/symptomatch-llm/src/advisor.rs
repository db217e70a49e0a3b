//! AI fallback: turns a symptom list into a prompt and asks the configured
//! backend for a short free-text suggestion.

use std::sync::Arc;
use std::time::Instant;

use crate::audit::LlmAuditEntry;
use crate::backend::{LlmBackend, LlmError, LlmRequest};

pub struct SymptomAdvisor {
    backend: Arc<dyn LlmBackend>,
}

impl SymptomAdvisor {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// The fixed prompt sent to the backend.
    pub fn build_prompt(symptoms: &[String]) -> String {
        format!(
            "The patient has the following symptoms: {}. Based on this, suggest a possible disease or condition in 2-3 sentences.",
            symptoms.join(", ")
        )
    }

    /// Ask the backend for a suggestion. The generated text is returned
    /// verbatim; failures are not retried.
    pub async fn suggest(&self, symptoms: &[String]) -> Result<String, LlmError> {
        if symptoms.is_empty() {
            return Err(LlmError::InvalidRequest("no symptoms provided".to_string()));
        }

        let started = Instant::now();
        let response = self.backend
            .complete(LlmRequest::prompt(Self::build_prompt(symptoms)))
            .await
            .map_err(|e| {
                tracing::error!(
                    backend = self.backend.provider(),
                    model = self.backend.model_id(),
                    error = %e,
                    "AI suggestion failed"
                );
                e
            })?;

        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        LlmAuditEntry::new(self.backend.provider(), &response, latency_ms).record();

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LlmResponse, Message};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Echo {
        seen: Mutex<Vec<Message>>,
    }

    #[async_trait]
    impl LlmBackend for Echo {
        async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
            self.seen.lock().unwrap().extend(req.messages.clone());
            Ok(LlmResponse {
                content: "  Raw text, untouched.\n".to_string(),
                model: "echo".to_string(),
                prompt_tokens: 0,
                completion_tokens: 0,
            })
        }
        fn model_id(&self) -> &str { "echo" }
        fn provider(&self) -> &'static str { "echo" }
    }

    fn symptoms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_template_is_exact() {
        assert_eq!(
            SymptomAdvisor::build_prompt(&symptoms(&["Headache", "Dizziness"])),
            "The patient has the following symptoms: Headache, Dizziness. Based on this, suggest a possible disease or condition in 2-3 sentences."
        );
    }

    #[tokio::test]
    async fn test_suggest_sends_single_user_prompt_and_returns_text_verbatim() {
        let backend = Arc::new(Echo { seen: Mutex::new(Vec::new()) });
        let advisor = SymptomAdvisor::new(backend.clone());

        let text = advisor.suggest(&symptoms(&["Headache"])).await.unwrap();
        assert_eq!(text, "  Raw text, untouched.\n");

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].role, "user");
        assert!(seen[0].content.contains("symptoms: Headache."));
    }

    #[tokio::test]
    async fn test_suggest_rejects_empty_symptom_list() {
        let backend = Arc::new(Echo { seen: Mutex::new(Vec::new()) });
        let advisor = SymptomAdvisor::new(backend.clone());

        let err = advisor.suggest(&[]).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
        assert!(backend.seen.lock().unwrap().is_empty());
    }
}
