//! Research endpoint handler
//!
//! Handles GET /research requests: Wikipedia-grounded, schema-coerced
//! answers. The assistant is the single failure boundary: every
//! collaborator error becomes the `{error, message}` envelope, while
//! unparseable model output silently degrades to the fallback record.

use crate::error::AppError;
use crate::handlers::AppState;
use crate::metrics::{Endpoint, Outcome};
use crate::middleware::RequestId;
use crate::research::ResearchResult;
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::time::Instant;

/// Query parameters for GET /research
///
/// A missing `query` parameter behaves like an empty string: it is passed
/// through to the lookup tool unvalidated.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchParams {
    #[serde(default)]
    pub query: String,
}

/// GET /research handler
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<ResearchParams>,
) -> Result<Json<ResearchResult>, AppError> {
    tracing::debug!(
        request_id = %request_id,
        query = %params.query,
        "Received research request"
    );

    let started = Instant::now();
    let result = state.assistant().run(&params.query).await;

    let outcome = if result.is_ok() {
        Outcome::Ok
    } else {
        Outcome::Error
    };
    state.metrics().record_request(Endpoint::Research, outcome);
    state
        .metrics()
        .observe_duration(Endpoint::Research, started.elapsed().as_secs_f64());

    match result {
        Ok(record) => {
            tracing::info!(
                request_id = %request_id,
                topic = %record.topic,
                source_count = record.sources.len(),
                "Research request completed"
            );
            Ok(Json(record))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Research request failed"
            );
            Err(e)
        }
    }
}
