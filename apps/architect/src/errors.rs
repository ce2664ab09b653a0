use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::pipeline::{PipelineError, Stage};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed form data: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, stage, retryable) = match &self {
            AppError::Multipart(e) => (e.status(), "INVALID_FORM", Stage::Validating, false),
            AppError::Pipeline(e) => {
                let (status, code) = match e {
                    PipelineError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                    PipelineError::Extraction(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR")
                    }
                    PipelineError::Generation(llm) if llm.is_auth() => {
                        (StatusCode::UNAUTHORIZED, "LLM_AUTH_ERROR")
                    }
                    PipelineError::Generation(_) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
                    PipelineError::Cleaning(_) => (StatusCode::BAD_GATEWAY, "EMPTY_ARTIFACT"),
                };
                (status, code, e.stage(), e.is_retryable())
            }
        };

        if status.is_server_error() {
            tracing::error!("{code}: {self}");
        } else {
            tracing::warn!("{code}: {self}");
        }

        // Provider and extraction messages are shown as-is: they tell the user what to fix.
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
                "stage": stage,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;
    use crate::generation::cleanup::CleanError;
    use crate::generation::pipeline::{RequiredInput, ValidationError};
    use crate::llm_client::LlmError;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let err = AppError::from(PipelineError::from(ValidationError::MissingInputs(vec![
            RequiredInput::ResumeFile,
        ])));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["stage"], "validating");
        assert_eq!(body["error"]["retryable"], false);
        assert_eq!(body["error"]["message"], "Please provide a resume file.");
    }

    #[tokio::test]
    async fn test_rate_limit_is_retryable_bad_gateway() {
        let err = AppError::from(PipelineError::from(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        }));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(body["error"]["stage"], "calling_model");
        assert_eq!(body["error"]["retryable"], true);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Resource has been exhausted"));
    }

    #[tokio::test]
    async fn test_rejected_key_is_unauthorized() {
        let err = AppError::from(PipelineError::from(LlmError::Api {
            status: 403,
            message: "Permission denied".to_string(),
        }));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "LLM_AUTH_ERROR");
    }

    #[tokio::test]
    async fn test_empty_artifact_is_cleaning_stage() {
        let err = AppError::from(PipelineError::from(CleanError::EmptyArtifact));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["stage"], "cleaning");
    }
}
