//! Prometheus metrics endpoint
//!
//! Exposes metrics in Prometheus text format for scraping.

use crate::handlers::AppState;
use axum::{extract::State, http::StatusCode};

/// Metrics handler for Prometheus scraping
///
/// # Response
///
/// - `200 OK` with metrics in Prometheus text format
/// - `500 Internal Server Error` if metrics encoding fails
pub async fn handler(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics().gather() {
        Ok(output) => (StatusCode::OK, output),
        Err(e) => {
            tracing::error!(error = %e, "Failed to gather metrics for Prometheus scraping");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to gather metrics: {}", e),
            )
        }
    }
}
