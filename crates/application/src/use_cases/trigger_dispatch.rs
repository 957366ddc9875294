//! Trigger dispatch and manual command listing.

use bridge_domain::constants::COMMAND_PREFIX;
use bridge_domain::{EndpointRecord, ExecutionResult, TriggerKind};

use super::endpoint_service::EndpointService;
use crate::error::EndpointResult;

/// A command-palette entry for one manual endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Stable command id, `run-endpoint-<endpoint id>`.
    pub id: String,
    /// Display name, `Run: <endpoint name>`.
    pub name: String,
    /// Endpoint the command runs.
    pub endpoint_id: String,
}

/// Lists one command per endpoint carrying the manual trigger.
#[must_use]
pub fn manual_commands(endpoints: &[EndpointRecord]) -> Vec<CommandSpec> {
    endpoints
        .iter()
        .filter(|endpoint| endpoint.has_trigger(&TriggerKind::Manual))
        .map(|endpoint| CommandSpec {
            id: format!("{COMMAND_PREFIX}{}", endpoint.id),
            name: format!("Run: {}", endpoint.name),
            endpoint_id: endpoint.id.clone(),
        })
        .collect()
}

/// Workspace events that can start endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// A note became the active file.
    NoteOpened,
    /// A note was modified on disk.
    NoteSaved,
    /// The editor selection changed.
    SelectionChanged {
        /// Currently selected text.
        selection: String,
    },
}

impl TriggerEvent {
    /// Returns the trigger kind endpoints subscribe with.
    #[must_use]
    pub const fn kind(&self) -> TriggerKind {
        match self {
            Self::NoteOpened => TriggerKind::OnNoteOpen,
            Self::NoteSaved => TriggerKind::OnNoteSave,
            Self::SelectionChanged { .. } => TriggerKind::OnSelection,
        }
    }

    fn fires(&self) -> bool {
        match self {
            Self::SelectionChanged { selection } => !selection.trim().is_empty(),
            Self::NoteOpened | Self::NoteSaved => true,
        }
    }
}

/// Runs the endpoints subscribed to workspace events.
#[derive(Clone)]
pub struct TriggerDispatcher {
    service: EndpointService,
}

impl TriggerDispatcher {
    /// Creates a dispatcher over `service`.
    #[must_use]
    pub const fn new(service: EndpointService) -> Self {
        Self { service }
    }

    /// Runs every endpoint subscribed to `event`, one after another, in
    /// store order.
    ///
    /// # Errors
    ///
    /// Returns an error only when the endpoint list cannot be read.
    pub async fn dispatch(
        &self,
        event: &TriggerEvent,
    ) -> EndpointResult<Vec<(String, ExecutionResult)>> {
        if !event.fires() {
            tracing::debug!(?event, "event ignored");
            return Ok(Vec::new());
        }

        let kind = event.kind();
        let endpoints = self.service.list_endpoints().await?;
        let mut results = Vec::new();
        for endpoint in endpoints.iter().filter(|e| e.has_trigger(&kind)) {
            let result = self.service.execute_endpoint(endpoint).await;
            if let Some(error) = result.error.as_deref().filter(|_| !result.success) {
                tracing::warn!(id = %endpoint.id, trigger = %kind, %error, "triggered endpoint failed");
            }
            results.push((endpoint.id.clone(), result));
        }

        tracing::info!(trigger = %kind, count = results.len(), "trigger dispatched");
        Ok(results)
    }
}
