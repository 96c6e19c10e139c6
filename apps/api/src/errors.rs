use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// This is the single shared responder: every failure path ends here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Generative-text service failure. The upstream message text is kept
    /// intact so it can be classified here by substring match.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingApiKey => {
                AppError::Configuration("API key is missing.".to_string())
            }
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "Validation error", msg.clone())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "Unauthorized", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "Forbidden", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error",
                    msg.clone(),
                )
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    e.to_string(),
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                classify_upstream(msg)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                classify_database(e)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error,
            "message": message
        }));

        (status, body).into_response()
    }
}

/// Maps an upstream failure to a status by message content:
/// credential complaints become 401, quota/rate-limit complaints 429.
fn classify_upstream(msg: &str) -> (StatusCode, &'static str, String) {
    if msg.contains("API key") {
        (StatusCode::UNAUTHORIZED, "Invalid API key", msg.to_string())
    } else if msg.contains("quota") || msg.contains("rate limit") {
        (
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded",
            msg.to_string(),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            msg.to_string(),
        )
    }
}

fn classify_database(e: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match e {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "Record not found",
            "The requested record could not be found".to_string(),
        ),
        sqlx::Error::Database(db) if db.is_unique_violation() => (
            StatusCode::CONFLICT,
            "Duplicate entry",
            "A record with this information already exists".to_string(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "A database error occurred".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_api_key_message_maps_to_401() {
        let response =
            AppError::Upstream("API error (status 400): API key not valid".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_upstream_rate_limit_message_maps_to_429() {
        let response =
            AppError::Upstream("API error (status 429): rate limit exceeded".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_upstream_quota_message_maps_to_429() {
        let response =
            AppError::Upstream("quota exceeded for this project".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_upstream_other_message_maps_to_500() {
        let response = AppError::Upstream("connection reset by peer".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response =
            AppError::Validation("Missing or invalid skills".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_extraction_errors_map_to_500() {
        let malformed: AppError = ExtractError::MalformedFencedBlock(
            "expected value at line 1 column 2".to_string(),
        )
        .into();
        let not_found: AppError = ExtractError::NotFound.into();
        assert_eq!(
            malformed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            not_found.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
