//! Wikipedia lookup tool
//!
//! Fetches a short page summary from the Wikipedia REST API
//! (`page/summary/{title}`) and returns its `extract` text.

use crate::clients::LookupTool;
use crate::config::LookupConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Client for the Wikipedia REST summary endpoint
pub struct WikipediaClient {
    http: reqwest::Client,
    base_url: String,
    timeout_seconds: Option<u64>,
}

impl WikipediaClient {
    /// Tool name used for prompt context and fallback attribution
    pub const NAME: &'static str = "Wikipedia";

    /// Create a new client from configuration
    pub fn new(config: &LookupConfig, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            timeout_seconds: timeout.map(|t| t.as_secs()),
        })
    }

    fn summary_url(&self, query: &str) -> String {
        // Wikipedia page titles use underscores for spaces; the rest of the
        // title is percent-encoded by the URL parser on request construction.
        format!(
            "{}/page/summary/{}",
            self.base_url,
            query.trim().replace(' ', "_")
        )
    }

    fn map_transport_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            if let Some(timeout_seconds) = self.timeout_seconds {
                return AppError::RequestTimeout {
                    endpoint: self.base_url.clone(),
                    timeout_seconds,
                };
            }
        }
        AppError::Lookup {
            tool: Self::NAME.to_string(),
            reason: error.to_string(),
        }
    }
}

#[async_trait]
impl LookupTool for WikipediaClient {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn lookup(&self, query: &str) -> AppResult<String> {
        // An empty query has no page title to resolve; fail the same way the
        // upstream library does instead of issuing a request that cannot
        // succeed.
        if query.trim().is_empty() {
            return Err(AppError::Lookup {
                tool: Self::NAME.to_string(),
                reason: "empty query has no page title".to_string(),
            });
        }

        let url = self.summary_url(query);
        tracing::debug!(query = %query, "Fetching Wikipedia summary");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(query = %query, status = %status, "Wikipedia summary fetch failed");
            return Err(AppError::Lookup {
                tool: Self::NAME.to_string(),
                reason: format!("summary fetch for '{}' returned status {}", query, status),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        body.get("extract")
            .and_then(Value::as_str)
            .filter(|extract| !extract.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Lookup {
                tool: Self::NAME.to_string(),
                reason: format!("summary response for '{}' carried no extract text", query),
            })
    }
}
