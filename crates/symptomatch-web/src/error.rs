//! Boundary error type: every handler failure becomes `{"error": "<message>"}`.

use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use symptomatch_analysis::AnalyzeError;
use symptomatch_common::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),

    /// `message` goes to the client, `cause` only to the log.
    #[error("{message}: {cause}")]
    Internal { message: &'static str, cause: String },
}

impl ApiError {
    /// `map_err` adapter keeping the cause for the log written by
    /// `into_response`; the client only sees `message`.
    pub fn internal<E: Display>(message: &'static str) -> impl FnOnce(E) -> Self {
        move |e| ApiError::Internal { message, cause: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what.to_string()),
            ApiError::Internal { message, cause } => {
                tracing::error!(cause, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Validation(e) => ApiError::Validation(e),
            AnalyzeError::Store(e) => ApiError::internal("Failed to analyze symptoms")(e),
            AnalyzeError::AiService(e) => ApiError::internal("AI service failed")(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::MalformedBody(rejection.body_text()))
    }
}

/// `Json` extractor whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
