//! External collaborator clients
//!
//! The model and the lookup tool are opaque collaborators behind traits, so
//! handlers receive them as injected dependencies and tests substitute
//! doubles that never touch the network.

pub mod gemini;
pub mod save;
pub mod search;
pub mod wikipedia;

pub use gemini::GeminiClient;
pub use save::SaveTool;
pub use search::SearchTool;
pub use wikipedia::WikipediaClient;

use crate::error::AppResult;
use async_trait::async_trait;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Standing instruction to the model
    System,
    /// User-authored content
    User,
}

/// One message in a chat-style prompt
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Build a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Build a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for the hosted language model collaborator
///
/// Given a list of chat-style messages, returns the model's free-text reply.
/// Allows dependency injection of different model implementations, enabling
/// testing with doubles that don't make real network calls.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the message list and return the reply text
    async fn generate(&self, messages: &[ChatMessage]) -> AppResult<String>;
}

/// Trait for the external lookup collaborator
///
/// Given a query string, returns a short text summary or fails.
#[async_trait]
pub trait LookupTool: Send + Sync {
    /// Name of the tool, used for fallback attribution in research results
    fn name(&self) -> &str;

    /// Fetch a short summary for the query
    async fn lookup(&self, query: &str) -> AppResult<String>;
}
