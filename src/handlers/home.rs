//! Root status endpoint

use axum::Json;
use serde::Serialize;

/// Status response for `GET /`
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// GET / handler
///
/// Answers with a fixed status document so probes and the frontend can
/// confirm the server is up.
pub async fn handler() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Wikiscout server is running!",
    })
}
