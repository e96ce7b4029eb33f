//! HTTP request handlers for the Wikiscout API

use crate::clients::{ChatModel, GeminiClient, LookupTool, WikipediaClient};
use crate::config::{ApiKey, Config};
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::middleware::request_id_middleware;
use crate::research::ResearchAssistant;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod chat;
pub mod health;
pub mod home;
pub mod metrics;
pub mod research;

/// Application state shared across all handlers
///
/// Holds the configuration and the injected collaborators. All fields are
/// Arc'd for cheap cloning across Axum handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    model: Arc<dyn ChatModel>,
    assistant: Arc<ResearchAssistant>,
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Create an AppState with the real Gemini and Wikipedia collaborators
    pub fn new(config: Arc<Config>, api_key: ApiKey) -> AppResult<Self> {
        let timeout = config.server.request_timeout();
        let model: Arc<dyn ChatModel> =
            Arc::new(GeminiClient::new(&config.model, api_key, timeout)?);
        let lookup: Arc<dyn LookupTool> = Arc::new(WikipediaClient::new(&config.lookup, timeout)?);
        Self::with_collaborators(config, model, lookup)
    }

    /// Create an AppState over explicit collaborators
    ///
    /// This is the injection seam: tests pass doubles here instead of the
    /// network-backed clients.
    pub fn with_collaborators(
        config: Arc<Config>,
        model: Arc<dyn ChatModel>,
        lookup: Arc<dyn LookupTool>,
    ) -> AppResult<Self> {
        let metrics = Arc::new(
            Metrics::new()
                .map_err(|e| AppError::Internal(format!("failed to register metrics: {}", e)))?,
        );
        let assistant = Arc::new(ResearchAssistant::new(model.clone(), lookup));

        Ok(Self {
            config,
            model,
            assistant,
            metrics,
        })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the model collaborator
    pub fn model(&self) -> &Arc<dyn ChatModel> {
        &self.model
    }

    /// Get reference to the research assistant
    pub fn assistant(&self) -> &ResearchAssistant {
        &self.assistant
    }

    /// Get reference to the metrics collector
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Build the application router
///
/// Routes take precedence over static assets: `/` always answers with the
/// status document, while the configured static directory (when present)
/// serves everything unmatched beneath it.
pub fn router(state: AppState) -> Router {
    let static_dir = state
        .config()
        .static_files
        .dir()
        .map(std::path::Path::to_path_buf);

    let mut app = Router::new()
        .route("/", get(home::handler))
        .route("/chat", post(chat::handler))
        .route("/research", get(research::handler))
        .route("/healthz", get(health::handler))
        .route("/metrics", get(metrics::handler));

    if let Some(dir) = static_dir {
        if dir.is_dir() {
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            tracing::warn!(
                dir = %dir.display(),
                "Configured static directory does not exist, skipping static file serving"
            );
        }
    }

    app.layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
