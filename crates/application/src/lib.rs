//! API Bridge Application - Ports, templates and use cases
//!
//! This crate defines the application layer with:
//! - Port traits for the HTTP transport, the host workspace and persistence
//! - Placeholder substitution and built-in variable interpolation
//! - The endpoint executor and the endpoint service on top of it
//! - Trigger dispatch and manual command listing

pub mod error;
pub mod executor;
pub mod ports;
pub mod template;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::{EndpointError, EndpointResult};
pub use executor::{EndpointExecutor, ExecutorPorts};
pub use ports::{HttpClient, HttpClientError};
pub use use_cases::{
    CommandSpec, EndpointService, ImportReport, TriggerDispatcher, TriggerEvent, manual_commands,
};
