//! Endpoint definitions and their building blocks.

pub mod body;
mod method;
mod record;
mod sink;
mod trigger;

pub use body::BodyTemplate;
pub use method::HttpMethod;
pub use record::{EndpointRecord, HeaderTemplates, INPUT_PLACEHOLDER};
pub use sink::ResponseSink;
pub use trigger::TriggerKind;
