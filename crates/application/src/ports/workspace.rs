//! Workspace ports: the active document, the vault and the note editor.

use async_trait::async_trait;

/// The document currently focused in the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    /// File name without extension.
    pub basename: String,
    /// Vault-relative path.
    pub path: String,
}

impl ActiveDocument {
    /// Builds the document from a vault-relative path.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path.rsplit('/').next().unwrap_or(&path);
        let basename = file_name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map_or(file_name, |(stem, _)| stem)
            .to_string();
        Self { basename, path }
    }
}

/// Read access to the host workspace.
pub trait WorkspaceContext: Send + Sync {
    /// Returns the active document, if any.
    fn active_document(&self) -> Option<ActiveDocument>;

    /// Returns the vault name.
    fn vault_name(&self) -> String;
}

/// Failures of response destinations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SinkError {
    /// Writing to the clipboard failed.
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// The editor refused the edit.
    #[error("Editor error: {0}")]
    Editor(String),

    /// Creating a note failed.
    #[error("Failed to create note {name}: {message}")]
    Note {
        /// Requested note name.
        name: String,
        /// Underlying error text.
        message: String,
    },
}

/// Write access to notes.
#[async_trait]
pub trait NoteEditor: Send + Sync {
    /// Replaces the selection of the focused editor with `text`.
    ///
    /// Returns `Ok(false)` when no editor is focused.
    ///
    /// # Errors
    ///
    /// Returns an error when the editor rejects the change.
    async fn replace_selection(&self, text: &str) -> Result<bool, SinkError>;

    /// Creates and persists a new note, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the note cannot be written.
    async fn create_note(&self, name: &str, content: &str) -> Result<String, SinkError>;
}

/// The system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns an error when the clipboard is not reachable.
    async fn write_text(&self, text: &str) -> Result<(), SinkError>;
}
