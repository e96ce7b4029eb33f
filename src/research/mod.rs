//! Research assistant orchestration
//!
//! One request flows lookup → prompt → model → extraction, strictly in that
//! order: the lookup result is required before the model is invoked, and a
//! lookup failure returns before any model call. Collaborators are injected
//! at construction so tests can substitute doubles.

pub mod extract;
pub mod prompt;

pub use extract::{ResearchResult, extract_research_result, normalize_fences};

use crate::clients::{ChatModel, LookupTool};
use crate::error::AppResult;
use std::sync::Arc;

/// Orchestrates a single research request end to end
pub struct ResearchAssistant {
    model: Arc<dyn ChatModel>,
    lookup: Arc<dyn LookupTool>,
}

impl ResearchAssistant {
    /// Create an assistant over the given collaborators
    pub fn new(model: Arc<dyn ChatModel>, lookup: Arc<dyn LookupTool>) -> Self {
        Self { model, lookup }
    }

    /// Run one research request
    ///
    /// The query is forwarded as-is; an empty query is passed through to the
    /// lookup tool unvalidated. Collaborator failures propagate as errors
    /// for the handler boundary to convert into the error envelope; a model
    /// reply that is not schema JSON is NOT a failure and degrades to the
    /// extractor's fallback record.
    pub async fn run(&self, query: &str) -> AppResult<ResearchResult> {
        let label = self.lookup.name().to_string();

        let context = self.lookup.lookup(query).await?;
        tracing::debug!(
            query_length = query.len(),
            context_length = context.len(),
            lookup_tool = %label,
            "Lookup completed"
        );

        let messages = prompt::research_messages(query, &context, &label);
        let reply = self.model.generate(&messages).await?;

        Ok(extract_research_result(&reply, query, &label))
    }
}
