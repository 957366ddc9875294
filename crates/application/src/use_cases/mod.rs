//! Application use cases (business logic orchestration).

mod endpoint_service;
mod trigger_dispatch;

pub use endpoint_service::{EndpointService, ImportReport};
pub use trigger_dispatch::{CommandSpec, TriggerDispatcher, TriggerEvent, manual_commands};
