//! Vault on the local file system.
//!
//! The vault is a directory of notes. The active document is chosen by the
//! embedding application; there is no editor, so selection replacement
//! always reports that nothing is focused.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bridge_application::ports::{ActiveDocument, NoteEditor, SinkError, WorkspaceContext};

use super::file_system::TokioFileSystem;

/// A directory-backed vault.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    active: Option<String>,
    fs: TokioFileSystem,
}

impl FsVault {
    /// Opens the vault rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            active: None,
            fs: TokioFileSystem::new(),
        }
    }

    /// Marks a vault-relative path as the active document.
    #[must_use]
    pub fn with_active_document(mut self, path: impl Into<String>) -> Self {
        let path = path.into().replace('\\', "/");
        self.active = Some(path.trim_start_matches("./").to_string());
        self
    }

    /// Returns the vault root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl WorkspaceContext for FsVault {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.active.as_deref().map(ActiveDocument::from_path)
    }

    fn vault_name(&self) -> String {
        self.root
            .canonicalize()
            .unwrap_or_else(|_| self.root.clone())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NoteEditor for FsVault {
    async fn replace_selection(&self, _text: &str) -> Result<bool, SinkError> {
        Ok(false)
    }

    async fn create_note(&self, name: &str, content: &str) -> Result<String, SinkError> {
        let path = self.root.join(name);
        self.fs
            .create_new(&path, content.as_bytes())
            .await
            .map_err(|e| SinkError::Note {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        tracing::info!(note = %name, "note created");
        Ok(name.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_active_document() {
        let vault = FsVault::new("/tmp/Notes Vault").with_active_document("./folder/Notes.md");
        assert_eq!(
            vault.active_document(),
            Some(ActiveDocument {
                basename: "Notes".into(),
                path: "folder/Notes.md".into(),
            })
        );
        assert_eq!(FsVault::new("/tmp").active_document(), None);
    }

    #[test]
    fn test_vault_name_is_directory_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("My Vault");
        std::fs::create_dir(&root).unwrap();
        assert_eq!(FsVault::new(&root).vault_name(), "My Vault");
    }

    #[tokio::test]
    async fn test_create_note_and_refuse_overwrite() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());

        let path = vault.create_note("Response.md", "body").await.unwrap();
        assert_eq!(path, "Response.md");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Response.md")).unwrap(),
            "body"
        );

        let err = vault.create_note("Response.md", "again").await.unwrap_err();
        assert!(matches!(err, SinkError::Note { .. }));
        assert!(!vault.replace_selection("x").await.unwrap());
    }
}
