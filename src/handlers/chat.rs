//! Chat endpoint handler
//!
//! Handles POST /chat requests: a direct passthrough to the model with no
//! lookup, no extraction, and no message validation.

use crate::clients::ChatMessage;
use crate::error::AppError;
use crate::handlers::AppState;
use crate::metrics::{Endpoint, Outcome};
use crate::middleware::RequestId;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Chat request from client
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response to client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model's reply, verbatim
    pub reply: String,
}

/// POST /chat handler
///
/// Forwards the message as a single-turn prompt and returns the reply text
/// unchanged. Collaborator failures surface as the error envelope.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    tracing::debug!(
        request_id = %request_id,
        message_length = request.message.len(),
        "Received chat request"
    );

    let started = Instant::now();
    let result = state
        .model()
        .generate(&[ChatMessage::user(request.message)])
        .await;

    let outcome = if result.is_ok() {
        Outcome::Ok
    } else {
        Outcome::Error
    };
    state.metrics().record_request(Endpoint::Chat, outcome);
    state
        .metrics()
        .observe_duration(Endpoint::Chat, started.elapsed().as_secs_f64());

    let reply = result.inspect_err(|e| {
        tracing::error!(
            request_id = %request_id,
            error = %e,
            "Chat request failed"
        );
    })?;

    tracing::info!(
        request_id = %request_id,
        reply_length = reply.len(),
        "Chat request completed"
    );

    Ok(Json(ChatResponse { reply }))
}
