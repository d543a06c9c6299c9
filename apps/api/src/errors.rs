use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The three flow error kinds (validation, model invocation, schema mismatch)
/// are terminal: no caller in this crate retries or downgrades them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(#[from] LlmError),

    #[error("Model output does not match schema '{schema}': {reason}")]
    SchemaMismatch { schema: &'static str, reason: String },

    #[error("Model ranked unknown candidate ids: {}", .0.join(", "))]
    UnknownCandidateIds(Vec<String>),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// Stable machine-readable code, also used as the `error.code` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ModelInvocation(LlmError::Timeout(_)) => "MODEL_TIMEOUT",
            AppError::ModelInvocation(_) => "MODEL_INVOCATION_ERROR",
            AppError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            AppError::UnknownCandidateIds(_) => "UNKNOWN_CANDIDATE_IDS",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ModelInvocation(e) => {
                tracing::error!("Model invocation error: {e}");
                let status = match e {
                    LlmError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, "The AI provider could not complete the request".to_string())
            }
            AppError::SchemaMismatch { schema, reason } => {
                tracing::error!("Schema mismatch for {schema}: {reason}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The AI provider returned an unusable response".to_string(),
                )
            }
            AppError::UnknownCandidateIds(ids) => {
                tracing::error!("Ranking referenced unknown candidates: {ids:?}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The AI provider ranked candidates that were not submitted".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
