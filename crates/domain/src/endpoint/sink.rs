//! Response destinations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a successful response is routed (`insertResponseTo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ResponseSink {
    /// Discard the response.
    #[default]
    None,
    /// Show a 200 character preview.
    Modal,
    /// Show a 100 character preview.
    Toast,
    /// Replace the current editor selection.
    ActiveNote,
    /// Write the response into a freshly created note.
    NewNote,
    /// Copy the response to the system clipboard.
    Clipboard,
    /// Unrecognised destination, kept verbatim for validation.
    Unknown(String),
}

impl ResponseSink {
    /// Returns whether the destination is recognised.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Modal => "modal",
            Self::Toast => "toast",
            Self::ActiveNote => "note",
            Self::NewNote => "new-note",
            Self::Clipboard => "clipboard",
            Self::Unknown(other) => other,
        }
    }
}

impl fmt::Display for ResponseSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ResponseSink {
    fn from(value: String) -> Self {
        match value.as_str() {
            "none" => Self::None,
            "modal" => Self::Modal,
            "toast" => Self::Toast,
            "note" | "activeNote" => Self::ActiveNote,
            "new-note" | "newNote" => Self::NewNote,
            "clipboard" => Self::Clipboard,
            _ => Self::Unknown(value),
        }
    }
}

impl From<ResponseSink> for String {
    fn from(value: ResponseSink) -> Self {
        value.as_str().to_string()
    }
}
