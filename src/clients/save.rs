//! Save tool
//!
//! Appends research text to a local log file, one newline-terminated blob
//! per call. The log has no structure and no rotation, and the service never
//! reads it back.

use crate::error::{AppError, AppResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reply returned after a successful append
pub const SAVE_CONFIRMATION: &str = "Saved successfully!";

/// Append-only text log collaborator
#[derive(Debug, Clone)]
pub struct SaveTool {
    path: PathBuf,
}

impl SaveTool {
    /// Create a save tool writing to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one text blob, creating the file on first use
    pub fn append(&self, data: &str) -> AppResult<&'static str> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AppError::SaveFailed {
                path: self.path.display().to_string(),
                source,
            })?;

        writeln!(file, "{}", data).map_err(|source| AppError::SaveFailed {
            path: self.path.display().to_string(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "Appended research output");
        Ok(SAVE_CONFIRMATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_file_and_terminates_lines() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("research_output.txt");
        let tool = SaveTool::new(&path);

        let reply = tool.append("first entry").expect("should append");
        assert_eq!(reply, SAVE_CONFIRMATION);
        tool.append("second entry").expect("should append");

        let content = std::fs::read_to_string(&path).expect("should read back");
        assert_eq!(content, "first entry\nsecond entry\n");
    }

    #[test]
    fn test_append_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        // Point at a path whose parent does not exist.
        let tool = SaveTool::new(dir.path().join("missing").join("log.txt"));
        let err = tool.append("entry").expect_err("should fail");
        assert!(matches!(err, AppError::SaveFailed { .. }));
    }
}
