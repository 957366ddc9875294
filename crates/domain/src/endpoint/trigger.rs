//! Trigger kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// The event class that may start an endpoint's execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TriggerKind {
    /// Explicit invocation from the command palette or ribbon.
    Manual,
    /// A note was opened.
    OnNoteOpen,
    /// A note was saved.
    OnNoteSave,
    /// The editor selection changed.
    OnSelection,
    /// Unrecognised trigger, kept verbatim for validation.
    Unknown(String),
}

impl TriggerKind {
    /// Returns all recognised trigger kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Manual,
            Self::OnNoteOpen,
            Self::OnNoteSave,
            Self::OnSelection,
        ]
    }

    /// Returns whether the trigger kind is recognised.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "manual",
            Self::OnNoteOpen => "onNoteOpen",
            Self::OnNoteSave => "onNoteSave",
            Self::OnSelection => "onSelection",
            Self::Unknown(other) => other,
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TriggerKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "manual" => Self::Manual,
            "onNoteOpen" => Self::OnNoteOpen,
            "onNoteSave" => Self::OnNoteSave,
            "onSelection" => Self::OnSelection,
            _ => Self::Unknown(value),
        }
    }
}

impl From<TriggerKind> for String {
    fn from(value: TriggerKind) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trigger_roundtrip_names() {
        let triggers: Vec<TriggerKind> =
            serde_json::from_str(r#"["manual", "onNoteSave", "onBoot"]"#).unwrap();
        assert_eq!(triggers[0], TriggerKind::Manual);
        assert_eq!(triggers[1], TriggerKind::OnNoteSave);
        assert_eq!(triggers[2], TriggerKind::Unknown("onBoot".to_string()));
        assert!(!triggers[2].is_known());
    }
}
