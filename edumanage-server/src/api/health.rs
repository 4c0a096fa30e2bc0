//! Health Check API Handler
//!
//! Simple health check endpoint for monitoring.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;

/// GET /health
/// Health check endpoint; also reports whether the database answers
pub async fn health_check(State(pool): State<PgPool>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
        }
    }
}
