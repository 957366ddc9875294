//! File-backed endpoint store.
//!
//! The whole [`Settings`] object lives in one JSON file. It is read on first
//! use, cached, and rewritten in full after every successful mutation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bridge_application::ports::{EndpointStore, SettingsMutation, StoreError};
use bridge_domain::Settings;
use tokio::sync::Mutex;

use super::file_system::{FileSystemError, TokioFileSystem};
use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

impl From<FileSystemError> for StoreError {
    fn from(error: FileSystemError) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<SerializationError> for StoreError {
    fn from(error: SerializationError) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Settings persisted as pretty JSON.
///
/// A missing file reads as [`Settings::default`]; the file is created on the
/// first mutation.
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    fs: TokioFileSystem,
    cache: Mutex<Option<Settings>>,
}

impl JsonSettingsStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fs: TokioFileSystem::new(),
            cache: Mutex::new(None),
        }
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Settings, StoreError> {
        match self.fs.read_optional(&self.path).await? {
            Some(bytes) => Ok(from_json_bytes(&bytes)?),
            None => {
                tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
                Ok(Settings::default())
            }
        }
    }
}

#[async_trait]
impl EndpointStore for JsonSettingsStore {
    async fn load(&self) -> Result<Settings, StoreError> {
        let mut cache = self.cache.lock().await;
        if let Some(settings) = cache.as_ref() {
            return Ok(settings.clone());
        }
        let settings = self.read().await?;
        *cache = Some(settings.clone());
        Ok(settings)
    }

    async fn mutate(&self, mutation: SettingsMutation<'_>) -> Result<(), StoreError> {
        let mut cache = self.cache.lock().await;
        let mut draft = match cache.as_ref() {
            Some(settings) => settings.clone(),
            None => self.read().await?,
        };

        mutation(&mut draft)?;

        let bytes = to_json_stable_bytes(&draft)?;
        self.fs.write_atomic(&self.path, &bytes).await?;
        tracing::debug!(path = %self.path.display(), "settings saved");

        *cache = Some(draft);
        Ok(())
    }
}
