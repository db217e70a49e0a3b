//! LLM backend trait and concrete implementations.
//!
//! Backends:
//!   GeminiBackend           — Google Gemini `generateContent` (default)
//!   OpenAiCompatibleBackend — any OpenAI-compatible `/v1/chat/completions`
//!                             endpoint (OpenAI, Ollama, LMStudio, vLLM, …)

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use symptomatch_config::{LlmConfig, LlmProvider};
use thiserror::Error;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("No API key configured for {0}")]
    MissingCredential(&'static str),
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
}

impl LlmRequest {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self { messages: vec![Message::user(text)] }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    fn model_id(&self) -> &str;
    fn provider(&self) -> &'static str;
}

/// Construct the backend selected by configuration.
pub fn build_backend(config: &LlmConfig) -> Arc<dyn LlmBackend> {
    let api_key = config.api_key.as_ref().map(|k| SecretString::from(k.expose_secret().to_string()));
    if api_key.is_none() {
        tracing::warn!(
            provider = ?config.provider,
            "No LLM API key configured, AI fallback requests will fail"
        );
    }

    match config.provider {
        LlmProvider::Gemini => {
            let mut backend = GeminiBackend::new(api_key, &config.model);
            if let Some(url) = &config.base_url {
                backend = backend.with_base_url(url);
            }
            Arc::new(backend)
        }
        LlmProvider::OpenaiCompatible => Arc::new(OpenAiCompatibleBackend::new(
            config.base_url.as_deref().unwrap_or(OPENAI_BASE_URL),
            &config.model,
            api_key,
        )),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;

    if status >= 400 {
        let body: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
        let message = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| text.chars().take(200).collect());
        return Err(LlmError::ApiError { status, message });
    }

    Ok(serde_json::from_str(&text)?)
}

fn token_count(v: &serde_json::Value) -> u32 {
    v.as_u64().map(|n| u32::try_from(n).unwrap_or(u32::MAX)).unwrap_or(0)
}

// ── 1. Google Gemini ──────────────────────────────────────────────────────────

pub struct GeminiBackend {
    pub model: String,
    base_url: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: Option<SecretString>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingCredential("gemini"))?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let contents: Vec<serde_json::Value> = req.messages.iter()
            .map(|m| serde_json::json!({
                "role": m.role,
                "parts": [{ "text": m.content }]
            }))
            .collect();
        let body = serde_json::json!({ "contents": contents });

        let resp = self.client
            .post(&url)
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let json = check_response_status(resp).await?;

        let content: String = json["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        if content.is_empty() {
            let reason = json["promptFeedback"]["blockReason"]
                .as_str()
                .or_else(|| json["candidates"][0]["finishReason"].as_str())
                .unwrap_or("no candidate text");
            return Err(LlmError::MalformedResponse(reason.to_string()));
        }

        Ok(LlmResponse {
            content,
            model: self.model.clone(),
            prompt_tokens:     token_count(&json["usageMetadata"]["promptTokenCount"]),
            completion_tokens: token_count(&json["usageMetadata"]["candidatesTokenCount"]),
        })
    }

    fn model_id(&self) -> &str { &self.model }
    fn provider(&self) -> &'static str { "gemini" }
}

// ── 2. OpenAI-Compatible ──────────────────────────────────────────────────────

pub struct OpenAiCompatibleBackend {
    pub base_url: String,
    pub model: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<SecretString>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(k) => req.bearer_auth(k.expose_secret()),
            None    => req,
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model":    &self.model,
            "messages": req.messages,
        });

        let resp = self.auth(self.client.post(&url)).json(&body).send().await?;
        let json = check_response_status(resp).await?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LlmError::MalformedResponse("no choices[0].message.content".to_string()))?
            .to_string();

        Ok(LlmResponse {
            content,
            model: json["model"].as_str().unwrap_or(self.model.as_str()).to_string(),
            prompt_tokens:     token_count(&json["usage"]["prompt_tokens"]),
            completion_tokens: token_count(&json["usage"]["completion_tokens"]),
        })
    }

    fn model_id(&self) -> &str { &self.model }
    fn provider(&self) -> &'static str { "openai_compatible" }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
