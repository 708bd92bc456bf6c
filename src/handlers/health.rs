//! Health check endpoint for service monitoring.

use crate::{error::AppError, store::SharedStore};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Storage backend that answered (`postgres` or `memory`)
    pub database: String,

    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "database": "postgres",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// If the store is unreachable, returns the standard 500 error response.
pub async fn health_check(State(store): State<SharedStore>) -> Result<Json<HealthResponse>, AppError> {
    store.ping().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        database: store.backend().to_string(),
        timestamp: Utc::now(),
    }))
}
