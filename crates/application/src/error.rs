//! Application error types

use thiserror::Error;

use crate::ports::{HttpClientError, StoreError};

/// Failures of endpoint management and execution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointError {
    /// The record failed one or more validation checks.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// The user declined to provide interactive input.
    #[error("Execution cancelled by user")]
    Cancelled,

    /// The transport failed before a response arrived.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {status_text}")]
    Http {
        /// Numeric status code.
        status: u16,
        /// Reason phrase.
        status_text: String,
    },

    /// A JSON template stopped being valid JSON after substitution.
    #[error("Invalid JSON body after interpolation: {0}")]
    InvalidTemplate(String),

    /// The settings store failed.
    #[error("{0}")]
    Storage(String),

    /// No endpoint has the given id.
    #[error("Endpoint with ID \"{0}\" not found")]
    NotFound(String),

    /// Settings are structurally unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<StoreError> for EndpointError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Rejected(errors) => Self::Validation(errors),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<HttpClientError> for EndpointError {
    fn from(error: HttpClientError) -> Self {
        Self::Network(error.to_string())
    }
}

/// Result type alias for application operations.
pub type EndpointResult<T> = Result<T, EndpointError>;
