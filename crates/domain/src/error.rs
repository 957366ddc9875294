//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while parsing or normalising endpoint data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body template has an unsupported shape.
    #[error("{0}")]
    InvalidBodyTemplate(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
