//! Application error type mapping to HTTP status codes.
//!
//! Every error body has the shape `{"message": "..."}`. Authorization
//! failures map to 401 with a single uniform message -- the response never
//! reveals whether a session was missing, expired, or belonged to the wrong
//! user. Storage failures are logged here and surfaced as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use senpai_types::error::{AuthError, CharacterError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Character-related errors.
    Character(CharacterError),
    /// Login and session authorization failures.
    Auth(AuthError),
    /// Validation error from the request boundary.
    Validation(String),
    /// Storage failure outside a service (e.g., the message flow).
    Storage(String),
}

impl From<CharacterError> for AppError {
    fn from(e: CharacterError) -> Self {
        AppError::Character(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Character(CharacterError::NotFound) => {
                (StatusCode::NOT_FOUND, "Character not found".to_string())
            }
            AppError::Character(CharacterError::Invalid { field, reason }) => {
                (StatusCode::BAD_REQUEST, format!("Invalid {field}: {reason}"))
            }
            AppError::Character(CharacterError::Storage(msg)) => {
                tracing::error!(error = %msg, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::Auth(AuthError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::Auth(AuthError::Credential(err)) => {
                tracing::error!(error = %err, "credential failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Auth(AuthError::Storage(msg)) | AppError::Storage(msg) => {
                tracing::error!(error = %msg, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
