//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: A referenced customer or credit does not exist,
///   a credit is looked up with the wrong owner, or a request field is invalid.
///   They all share one variant; only the message tells them apart.
/// - **Database Errors**: Any sqlx::Error from the PostgreSQL store
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request referenced something that does not exist, or carried invalid data.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("{0}")]
    Validation(String),

    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password could not be hashed.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

impl AppError {
    /// Shorthand for building a [`AppError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }
}

/// A JSON body that is malformed, misses a field or holds a value of the
/// wrong type is a client error like any other invalid field.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "validation_error",
///     "message": "Customer 72 not found"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Validation` → 400 Bad Request
/// - `Database`, `PasswordHash` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(msg) => {
                tracing::warn!("Validation failed: {}", msg);
                (StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::PasswordHash(err) => {
                tracing::error!("Password hashing error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
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
