//! Fixed values shared by every layer.

/// Installed identifier of this integration, substituted for `{{plugin-id}}`.
pub const PLUGIN_ID: &str = "obsidian-api-bridge";

/// Prefix of command identifiers registered for manual endpoints.
pub const COMMAND_PREFIX: &str = "run-endpoint-";

/// Request timeout applied when settings do not override it.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Prompt shown when an endpoint needs `{{input}}` and has no `inputPrompt`.
pub const DEFAULT_INPUT_PROMPT: &str = "Enter a value for 'input':";

/// Message of the terminal cancelled state.
pub const EXECUTION_CANCELLED: &str = "Execution cancelled by user";

/// Characters of the response shown by the modal sink.
pub const MODAL_PREVIEW_CHARS: usize = 200;

/// Characters of the response shown by the toast sink.
pub const TOAST_PREVIEW_CHARS: usize = 100;

/// Characters of the response kept in an execution log entry.
pub const LOG_RESPONSE_CHARS: usize = 1000;

/// Marker appended to a truncated log response.
pub const LOG_TRUNCATION_MARKER: &str = "\n...(truncated)";

/// Vault-relative folder holding the daily execution logs.
pub const LOG_FOLDER: &str = ".api-bridge-logs";

/// Token consulted for the `{{token}}` built-in.
pub const DEFAULT_TOKEN_NAME: &str = "default";
