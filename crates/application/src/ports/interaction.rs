//! User interaction ports
//!
//! The core never touches widgets; it asks for text and posts notices
//! through these capabilities.

use std::fmt;

use async_trait::async_trait;

/// Asks the user for a value.
#[async_trait]
pub trait InputPrompt: Send + Sync {
    /// Shows `prompt` and waits for the user.
    ///
    /// Returns `None` when the user cancels or dismisses the prompt without
    /// typing; a submitted empty string is `Some("")`.
    async fn prompt_for_text(&self, prompt: &str) -> Option<String>;
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Neutral information, e.g. a response preview.
    Info,
    /// Something completed.
    Success,
    /// Something the user should look at.
    Warning,
    /// Something failed.
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Posts short notices to the user (toasts).
pub trait Notifier: Send + Sync {
    /// Shows a notice.
    fn notify(&self, kind: NoticeKind, message: &str);
}
