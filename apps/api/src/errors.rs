use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upstream model error (status {status}, model {model})")]
    UpstreamModel {
        status: u16,
        model: String,
        body: Value,
    },

    #[error("Upstream API error (model {model}): {message}")]
    UpstreamApi { model: String, message: String },

    /// Anything the model call produced that fits no other variant.
    #[error("Agent failed: {0}")]
    Agent(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Status {
                status,
                model,
                body,
            } => AppError::UpstreamModel {
                status,
                model,
                body,
            },
            LlmError::Api { model, message } => AppError::UpstreamApi { model, message },
            other @ LlmError::InvalidOutput(_) => AppError::Agent(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, Value::String(msg)),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, Value::String(msg)),
            AppError::UpstreamModel {
                status,
                model,
                body,
            } => {
                tracing::warn!("Upstream model error: status={status} model={model}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "upstream_model_error",
                        "upstream_status_code": status,
                        "model": model,
                        "body": body,
                    }),
                )
            }
            AppError::UpstreamApi { model, message } => {
                tracing::warn!("Upstream API error: model={model}: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "upstream_api_error",
                        "model": model,
                        "message": message,
                    }),
                )
            }
            AppError::Agent(msg) => {
                tracing::error!("Agent failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String(format!("Agent failed: {msg}")),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String("Internal Server Error".to_string()),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
