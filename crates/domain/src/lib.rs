//! API Bridge Domain - Core business types
//!
//! This crate defines the endpoint model: records, body templates,
//! validation rules, settings and execution outcomes.
//! All types here are pure Rust with no I/O dependencies.

pub mod constants;
pub mod endpoint;
pub mod error;
pub mod execution;
pub mod id;
pub mod settings;
pub mod validation;

pub use endpoint::{
    BodyTemplate, EndpointRecord, HeaderTemplates, HttpMethod, INPUT_PLACEHOLDER, ResponseSink,
    TriggerKind,
};
pub use error::{DomainError, DomainResult};
pub use execution::{ExecutionResult, ExecutionStage, LogEntry, LoggedRequest, preview};
pub use id::generate_execution_id;
pub use settings::{Settings, TokenMap};
pub use validation::{ValidationResult, validate, validate_endpoint_id};
