//! Execution log port

use async_trait::async_trait;
use bridge_domain::LogEntry;

/// Errors that can occur while appending to the log.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LogError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Append-only record of executions.
#[async_trait]
pub trait ExecutionLog: Send + Sync {
    /// Appends an entry and returns where it was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry could not be persisted.
    async fn append(&self, entry: &LogEntry) -> Result<String, LogError>;
}
