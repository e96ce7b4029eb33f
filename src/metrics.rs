//! Prometheus metrics collection for Wikiscout
//!
//! Tracks request counts by endpoint and outcome, plus request latency.
//! Metrics are exposed via the `/metrics` endpoint in Prometheus text format.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Endpoint enum for type-safe metrics labels
///
/// Restricting label values to a closed set keeps metric cardinality bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// POST /chat passthrough
    Chat,
    /// GET /research structured endpoint
    Research,
}

impl Endpoint {
    /// Convert endpoint to Prometheus label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Chat => "chat",
            Endpoint::Research => "research",
        }
    }
}

/// Request outcome enum for type-safe metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
}

impl Outcome {
    /// Convert outcome to Prometheus label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Error => "error",
        }
    }
}

/// Metrics collector for Wikiscout
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "wikiscout_requests_total",
                "Total number of requests by endpoint and outcome",
            ),
            &["endpoint", "outcome"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "wikiscout_request_duration_seconds",
                "End-to-end request duration by endpoint",
            ),
            &["endpoint"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            request_duration,
        })
    }

    /// Record one handled request
    ///
    /// Labels come from closed enums, so recording cannot fail.
    pub fn record_request(&self, endpoint: Endpoint, outcome: Outcome) {
        self.requests_total
            .with_label_values(&[endpoint.as_str(), outcome.as_str()])
            .inc();
    }

    /// Record request duration in seconds
    pub fn observe_duration(&self, endpoint: Endpoint, seconds: f64) {
        self.request_duration
            .with_label_values(&[endpoint.as_str()])
            .observe(seconds);
    }

    /// Gather all metrics in Prometheus text format
    pub fn gather(&self) -> crate::error::AppResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| {
                crate::error::AppError::Internal(format!("failed to encode metrics: {}", e))
            })?;
        String::from_utf8(buffer).map_err(|e| {
            crate::error::AppError::Internal(format!("metrics output was not valid UTF-8: {}", e))
        })
    }
}
