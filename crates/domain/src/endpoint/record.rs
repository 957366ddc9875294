//! Endpoint record

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::body::{self, BodyTemplate};
use super::{HttpMethod, ResponseSink, TriggerKind};

/// Placeholder that requests interactive input from the user.
pub const INPUT_PLACEHOLDER: &str = "{{input}}";

/// Header templates keyed by header name, in insertion order.
///
/// A `None` value is a `null` read from settings; the validator rejects it.
pub type HeaderTemplates = IndexMap<String, Option<String>>;

/// A saved HTTP request template plus execution metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    /// Unique identifier, `[A-Za-z0-9_-]+`.
    #[serde(default)]
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// URL template.
    #[serde(default)]
    pub url: String,
    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,
    /// Header templates.
    #[serde(default)]
    pub headers: HeaderTemplates,
    /// Optional body template.
    #[serde(
        default,
        deserialize_with = "body::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub body_template: Option<BodyTemplate>,
    /// Events that start this endpoint.
    #[serde(default)]
    pub trigger: Vec<TriggerKind>,
    /// Destination of the response.
    #[serde(default)]
    pub insert_response_to: ResponseSink,
    /// Advisory flag; the executor does not ask for confirmation.
    #[serde(default)]
    pub require_confirmation: bool,
    /// Optional response parser, must be JSON when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_parser: Option<String>,
    /// Prompt shown when `{{input}}` is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_prompt: Option<String>,
    /// Free-form metadata, must be a JSON object when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl EndpointRecord {
    /// Creates a manual endpoint that discards its response.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            method,
            headers: IndexMap::new(),
            body_template: None,
            trigger: vec![TriggerKind::Manual],
            insert_response_to: ResponseSink::None,
            require_confirmation: false,
            response_parser: None,
            input_prompt: None,
            meta: None,
        }
    }

    /// Adds a header template.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), Some(value.into()));
        self
    }

    /// Sets the body template.
    #[must_use]
    pub fn with_body(mut self, body: BodyTemplate) -> Self {
        self.body_template = Some(body);
        self
    }

    /// Replaces the trigger set.
    #[must_use]
    pub fn with_triggers(mut self, triggers: impl IntoIterator<Item = TriggerKind>) -> Self {
        self.trigger = triggers.into_iter().collect();
        self
    }

    /// Sets the response destination.
    #[must_use]
    pub fn with_sink(mut self, sink: ResponseSink) -> Self {
        self.insert_response_to = sink;
        self
    }

    /// Sets the input prompt.
    #[must_use]
    pub fn with_input_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.input_prompt = Some(prompt.into());
        self
    }

    /// Returns whether the endpoint fires for the given trigger.
    #[must_use]
    pub fn has_trigger(&self, kind: &TriggerKind) -> bool {
        self.trigger.contains(kind)
    }

    /// Returns whether running this endpoint needs interactive input.
    ///
    /// Scans the URL template and the serialised body template.
    #[must_use]
    pub fn needs_input(&self) -> bool {
        self.url.contains(INPUT_PLACEHOLDER)
            || self
                .body_template
                .as_ref()
                .is_some_and(|body| body.template_text().contains(INPUT_PLACEHOLDER))
    }
}
