//! Web search tool stub
//!
//! Placeholder lookup implementation kept for interface parity: it answers
//! every query with a canned notice instead of hitting a search backend.

use crate::clients::LookupTool;
use crate::error::AppResult;
use async_trait::async_trait;

/// Stub search collaborator
#[derive(Debug, Default)]
pub struct SearchTool;

impl SearchTool {
    /// Tool name used for attribution
    pub const NAME: &'static str = "Search";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LookupTool for SearchTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn lookup(&self, query: &str) -> AppResult<String> {
        Ok(format!(
            "Search results for '{}' are not yet implemented.",
            query
        ))
    }
}
