//! Shared fixtures for the Symptomatch test suites.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use symptomatch_common::{Disease, DiseaseDraft};
use symptomatch_db::{seed_defaults, Database, DbError, DiseaseStore};
use symptomatch_llm::{LlmBackend, LlmError, LlmRequest, LlmResponse, SymptomAdvisor};
use uuid::Uuid;

pub fn tokens(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// In-memory database loaded with the default Flu/Cold data set.
pub async fn seeded_database() -> Database {
    let db = Database::in_memory();
    seed_defaults(&db)
        .await
        .expect("seeding the in-memory store cannot fail");
    db
}

// ── LLM ──────────────────────────────────────────────────────────────────────

enum Script {
    Reply(String),
    Fail(String),
}

/// Backend that returns a fixed reply (or error) and records every prompt.
pub struct ScriptedBackend {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn replying(text: impl Into<String>) -> Self {
        Self { script: Script::Reply(text.into()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { script: Script::Fail(message.into()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompt log poisoned").len()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let prompt = req
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().expect("prompt log poisoned").push(prompt);

        match &self.script {
            Script::Reply(text) => Ok(LlmResponse {
                content: text.clone(),
                model: "scripted".to_string(),
                prompt_tokens: 0,
                completion_tokens: 0,
            }),
            Script::Fail(message) => Err(LlmError::ApiError {
                status: 503,
                message: message.clone(),
            }),
        }
    }

    fn model_id(&self) -> &str { "scripted" }
    fn provider(&self) -> &'static str { "scripted" }
}

pub fn advisor_with(backend: Arc<ScriptedBackend>) -> Arc<SymptomAdvisor> {
    Arc::new(SymptomAdvisor::new(backend))
}

// ── Store ────────────────────────────────────────────────────────────────────

/// Disease store whose every operation fails.
pub struct FailingStore;

fn unavailable<T>() -> Result<T, DbError> {
    Err(DbError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl DiseaseStore for FailingStore {
    async fn insert(&self, _draft: DiseaseDraft) -> Result<Disease, DbError> { unavailable() }
    async fn list(&self) -> Result<Vec<Disease>, DbError> { unavailable() }
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Disease>, DbError> { unavailable() }
    async fn update(&self, _id: Uuid, _draft: DiseaseDraft) -> Result<Option<Disease>, DbError> {
        unavailable()
    }
    async fn delete(&self, _id: Uuid) -> Result<bool, DbError> { unavailable() }
    async fn find_by_any_symptom(&self, _symptoms: &[String]) -> Result<Vec<Disease>, DbError> {
        unavailable()
    }
    async fn replace_all(&self, _drafts: Vec<DiseaseDraft>) -> Result<Vec<Disease>, DbError> {
        unavailable()
    }
    fn backend_name(&self) -> &'static str { "failing" }
}
