use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::profiles::store::ProfileError;
use crate::render::RenderError;
use crate::resume::codec::CodecError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CodecError> for AppError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Io(e) => AppError::Internal(e.into()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        let message = e.to_string();
        match e {
            ProfileError::NotFound(_) => AppError::NotFound(message),
            ProfileError::InvalidId(_) => AppError::Validation(message),
            _ => AppError::Storage(message),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        let message = e.to_string();
        match e {
            RenderError::MissingField(_) => AppError::UnprocessableEntity(message),
            RenderError::Pdf(_) => AppError::Internal(anyhow::anyhow!(message)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Body of tool-style endpoints that report downstream failures in-band:
/// the result on success, `{"error": "<message>"}` otherwise, always HTTP 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ToolResponse<T> {
    Ok(T),
    Error { error: String },
}

impl<T> ToolResponse<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ToolResponse::Ok(value),
            Err(e) => {
                tracing::warn!("Tool call failed: {e}");
                ToolResponse::Error {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_response_shapes() {
        let ok: ToolResponse<Vec<u8>> = ToolResponse::from_result(Ok::<_, String>(vec![1]));
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!([1]));

        let err: ToolResponse<Vec<u8>> = ToolResponse::from_result(Err("boom"));
        assert_eq!(serde_json::to_value(&err).unwrap(), json!({"error": "boom"}));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::from(RenderError::MissingField("name")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(CodecError::MissingColumns(vec!["content".into()])),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(ProfileError::NotFound("ada".into())),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
