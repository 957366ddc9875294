//! Daily JSON execution log.
//!
//! Entries for one UTC day share a file, `<folder>/YYYY-MM-DD.json`, that
//! holds a JSON array. Appends within this process are serialised by a
//! mutex and each rewrite goes through a temporary file and a rename.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bridge_application::ports::{ExecutionLog, LogError};
use bridge_domain::LogEntry;
use bridge_domain::constants::LOG_FOLDER;
use serde_json::Value;
use tokio::sync::Mutex;

use super::file_system::TokioFileSystem;
use crate::serialization::to_json_stable_bytes;

/// Execution log stored as one JSON array per day.
#[derive(Debug)]
pub struct DailyJsonLog {
    folder: PathBuf,
    fs: TokioFileSystem,
    append_lock: Mutex<()>,
}

impl DailyJsonLog {
    /// Creates a log writing into `.api-bridge-logs` under `vault_root`.
    #[must_use]
    pub fn in_vault(vault_root: &Path) -> Self {
        Self::new(vault_root.join(LOG_FOLDER))
    }

    /// Creates a log writing into `folder`.
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            fs: TokioFileSystem::new(),
            append_lock: Mutex::new(()),
        }
    }

    /// Returns the folder holding the day files.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    async fn read_entries(&self, path: &Path) -> Result<Vec<Value>, LogError> {
        let Some(bytes) = self
            .fs
            .read_optional(path)
            .await
            .map_err(|e| LogError::Io(e.to_string()))?
        else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %path.display(), "log file is not a JSON array, starting over");
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl ExecutionLog for DailyJsonLog {
    async fn append(&self, entry: &LogEntry) -> Result<String, LogError> {
        let _guard = self.append_lock.lock().await;
        let path = self.folder.join(entry.file_name());

        let mut entries = self.read_entries(&path).await?;
        entries.push(serde_json::to_value(entry).map_err(|e| LogError::Serialization(e.to_string()))?);

        let bytes =
            to_json_stable_bytes(&entries).map_err(|e| LogError::Serialization(e.to_string()))?;
        self.fs
            .write_atomic(&path, &bytes)
            .await
            .map_err(|e| LogError::Io(e.to_string()))?;

        Ok(path.display().to_string())
    }
}
