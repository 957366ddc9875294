//! File system helpers over `tokio::fs`.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Errors from file system operations.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// The path does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The process may not access the path.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path is already taken.
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FileSystemError {
    fn from_io(error: io::Error, path: &Path) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            _ => Self::Io(error),
        }
    }
}

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads a file, or returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a missing file.
    pub async fn read_optional(&self, path: &Path) -> Result<Option<Vec<u8>>, FileSystemError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FileSystemError::from_io(e, path)),
        }
    }

    /// Replaces a file through a sibling temporary file and a rename, so
    /// readers never observe a partial write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent cannot be created or either step fails.
    pub async fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileSystemError::from_io(e, parent))?;
        }

        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        fs::write(&temp_path, contents)
            .await
            .map_err(|e| FileSystemError::from_io(e, &temp_path))?;
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))
    }

    /// Creates a new file, failing if one already exists.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::AlreadyExists`] when the path is taken.
    pub async fn create_new(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        use tokio::io::AsyncWriteExt;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileSystemError::from_io(e, parent))?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))?;
        file.write_all(contents).await?;
        file.flush().await?;
        Ok(())
    }
}
