//! Execution outcome types
//!
//! Defines the stages an endpoint run moves through, the result handed back
//! to the trigger that started it, and the persisted log entry.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::{EXECUTION_CANCELLED, LOG_RESPONSE_CHARS, LOG_TRUNCATION_MARKER};

/// Stages of one endpoint run.
///
/// `Cancelled` is only reachable from `AwaitingInput`; `Failed` from any
/// stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStage {
    /// Nothing started yet.
    Idle,
    /// Waiting for the user to submit or cancel the input prompt.
    AwaitingInput,
    /// Filling templates.
    Interpolating,
    /// HTTP request in flight.
    Dispatching,
    /// Handing the response to its destination.
    RoutingResponse,
    /// Writing the execution log entry.
    Logging,
    /// Finished successfully.
    Done,
    /// The user declined to provide input.
    Cancelled,
    /// Aborted by an error.
    Failed,
}

impl ExecutionStage {
    /// Returns whether no further stage follows.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Failed)
    }

    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingInput => "awaiting_input",
            Self::Interpolating => "interpolating",
            Self::Dispatching => "dispatching",
            Self::RoutingResponse => "routing_response",
            Self::Logging => "logging",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ExecutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome reported to whoever triggered an endpoint.
///
/// `success` reflects validation and dispatch only; routing and logging
/// problems are reported through notifications instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Whether the request was dispatched and answered with a 2xx status.
    pub success: bool,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Full response text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ExecutionResult {
    /// Creates a successful result.
    #[must_use]
    pub fn succeeded(response: impl Into<String>) -> Self {
        Self {
            success: true,
            error: None,
            response: Some(response.into()),
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            response: None,
        }
    }

    /// Creates the result of a run the user cancelled.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::failed(EXECUTION_CANCELLED)
    }

    /// Returns whether this is the cancelled outcome.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        !self.success && self.error.as_deref() == Some(EXECUTION_CANCELLED)
    }
}

/// The request as it was sent, recorded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedRequest {
    /// Interpolated URL.
    pub url: String,
    /// Interpolated headers.
    pub headers: IndexMap<String, String>,
    /// Wire body, absent when none was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// One persisted execution record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Endpoint id.
    pub id: String,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
    /// What was sent.
    pub request: LoggedRequest,
    /// Response text, truncated.
    pub response: String,
}

impl LogEntry {
    /// Creates an entry, truncating the response to the log limit.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        request: LoggedRequest,
        response: &str,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            request,
            response: truncate_for_log(response),
        }
    }

    /// Returns the log file name for the entry's UTC day.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.timestamp.format("%Y-%m-%d"))
    }
}

/// Returns the first `limit` characters of `text`.
#[must_use]
pub fn preview(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn truncate_for_log(response: &str) -> String {
    let kept = preview(response, LOG_RESPONSE_CHARS);
    if kept.len() == response.len() {
        response.to_string()
    } else {
        format!("{kept}{LOG_TRUNCATION_MARKER}")
    }
}
