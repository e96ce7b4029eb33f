//! Gemini model client
//!
//! Thin reqwest wrapper around the `models/{model}:generateContent` REST
//! endpoint. System messages become the request's `systemInstruction`; user
//! messages become `contents` entries.

use crate::clients::{ChatMessage, ChatModel, Role};
use crate::config::{ApiKey, ModelConfig};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

/// Client for the hosted Gemini API
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: ApiKey,
    timeout_seconds: Option<u64>,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// `timeout` applies to the whole request including the response body.
    /// `None` means no timeout, matching the original service where the
    /// collaborator's own default is in effect.
    pub fn new(
        config: &ModelConfig,
        api_key: ApiKey,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
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
            model: config.name().to_string(),
            api_key,
            timeout_seconds: timeout.map(|t| t.as_secs()),
        })
    }

    /// Get the configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose()
        )
    }

    /// Build the generateContent request body from a message list
    ///
    /// System messages are collected into `systemInstruction`; everything
    /// else becomes a user-role `contents` entry in order.
    fn build_payload(messages: &[ChatMessage]) -> Value {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            match message.role {
                Role::System => system_parts.push(json!({ "text": message.content })),
                Role::User => contents.push(json!({
                    "role": "user",
                    "parts": [{ "text": message.content }],
                })),
            }
        }

        let mut payload = json!({ "contents": contents });
        if !system_parts.is_empty() {
            payload["systemInstruction"] = json!({ "parts": system_parts });
        }
        payload
    }

    /// Pull the reply text out of a generateContent response body
    ///
    /// Concatenates every text part of the first candidate. Returns None if
    /// the response carries no candidate text at all.
    fn extract_text(body: &Value) -> Option<String> {
        let parts = body
            .get("candidates")?
            .as_array()?
            .first()?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let mut text = String::new();
        for part in parts {
            if let Some(fragment) = part.get("text").and_then(Value::as_str) {
                text.push_str(fragment);
            }
        }

        if text.is_empty() { None } else { Some(text) }
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
        AppError::ModelQuery {
            endpoint: self.base_url.clone(),
            reason: error.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let payload = Self::build_payload(messages);

        tracing::debug!(
            model = %self.model,
            message_count = messages.len(),
            "Sending generateContent request"
        );

        // The API key rides in the query string; only the base URL is ever
        // logged or surfaced in errors.
        let response = self
            .http
            .post(self.request_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                model = %self.model,
                status = %status,
                "generateContent request failed"
            );
            return Err(AppError::ModelQuery {
                endpoint: self.base_url.clone(),
                reason: format!("generateContent returned status {}", status),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let text = Self::extract_text(&body).ok_or_else(|| AppError::ModelQuery {
            endpoint: self.base_url.clone(),
            reason: "response contained no candidate text".to_string(),
        })?;

        tracing::debug!(
            model = %self.model,
            reply_length = text.len(),
            "Model reply received"
        );

        Ok(text)
    }
}
