//! Endpoint validation
//!
//! Validation is total: every check runs and every violation is reported,
//! so an editor can show all problems at once.

use url::Url;

use crate::endpoint::{EndpointRecord, body::MISSING_TYPE_OR_VALUE};

/// Verdict of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    /// Human-readable reasons, in check order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Returns whether no check failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Joins the reasons with `", "`.
    #[must_use]
    pub fn message(&self) -> String {
        self.errors.join(", ")
    }

    fn push(&mut self, reason: impl Into<String>) {
        self.errors.push(reason.into());
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns whether `url` parses as an absolute URL with a host.
#[must_use]
pub fn is_absolute_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| parsed.has_host())
}

/// Returns whether `text` is syntactically valid JSON.
#[must_use]
pub fn is_json(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Returns whether `id` only uses letters, digits, hyphens and underscores.
#[must_use]
pub fn is_valid_id_pattern(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validates a complete endpoint record.
#[must_use]
pub fn validate(endpoint: &EndpointRecord) -> ValidationResult {
    let mut result = ValidationResult::default();

    if is_blank(&endpoint.id) {
        result.push("ID is required");
    }
    if is_blank(&endpoint.name) {
        result.push("Name is required");
    }
    if is_blank(&endpoint.url) {
        result.push("URL is required");
    } else if !is_absolute_url(&endpoint.url) {
        result.push("Invalid URL format");
    }

    if !endpoint.method.is_supported() {
        result.push("Invalid HTTP method");
    }

    for (key, value) in &endpoint.headers {
        if is_blank(key) {
            result.push("Header key cannot be empty");
        }
        if value.is_none() {
            result.push(format!("Header value for \"{key}\" cannot be null or undefined"));
        }
    }

    if endpoint
        .body_template
        .as_ref()
        .is_some_and(crate::endpoint::BodyTemplate::is_empty)
    {
        result.push(MISSING_TYPE_OR_VALUE);
    }

    if endpoint.trigger.is_empty() {
        result.push("At least one trigger type is required");
    }
    for trigger in endpoint.trigger.iter().filter(|t| !t.is_known()) {
        result.push(format!("Invalid trigger type: {trigger}"));
    }

    if !endpoint.insert_response_to.is_known() {
        result.push("Invalid insert action");
    }

    if let Some(parser) = endpoint.response_parser.as_deref() {
        if !is_blank(parser) && !is_json(parser) {
            result.push("Response parser must be valid JSON");
        }
    }

    if endpoint.input_prompt.as_deref().is_some_and(is_blank) {
        result.push("Input prompt cannot be empty if provided");
    }

    if endpoint.meta.as_ref().is_some_and(|meta| !meta.is_object()) {
        result.push("Meta data must be an object");
    }

    result
}

/// Validates an identifier for a record about to be created.
#[must_use]
pub fn validate_endpoint_id(id: &str, existing: &[EndpointRecord]) -> ValidationResult {
    let mut result = ValidationResult::default();

    if is_blank(id) {
        result.push("ID is required");
        return result;
    }
    if existing.iter().any(|endpoint| endpoint.id == id) {
        result.push("ID must be unique");
    }
    if !is_valid_id_pattern(id) {
        result.push("ID can only contain letters, numbers, hyphens, and underscores");
    }

    result
}
