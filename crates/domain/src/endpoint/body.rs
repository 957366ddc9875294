//! Request body templates
//!
//! A body template is either a raw text template or a JSON value template.
//! Every shape found in older settings files (plain strings, bare objects,
//! `{}` placeholders) is normalised here, when the record is read, so the
//! executor only ever sees the two tagged cases.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Reason reported for a tagged template without a usable `value`.
pub const MISSING_TYPE_OR_VALUE: &str =
    "Body template object must have 'type' and 'value' properties";

/// Reason reported for a tagged template with an unknown `type`.
pub const UNKNOWN_TYPE: &str = "Body template type must be 'object' or 'raw'";

/// A request body template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyTemplate {
    /// Text sent verbatim after interpolation.
    Raw(String),
    /// JSON value serialised, interpolated and re-validated before sending.
    Object(Value),
}

impl BodyTemplate {
    /// Creates a raw text template.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self::Raw(content.into())
    }

    /// Creates a JSON template.
    #[must_use]
    pub const fn object(value: Value) -> Self {
        Self::Object(value)
    }

    /// Normalises any accepted JSON shape into a template.
    ///
    /// Returns `Ok(None)` for shapes that mean "no body" (`null`, `""`, `{}`).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBodyTemplate`] for tagged objects with an
    /// unknown tag or no value, and for scalars other than strings.
    pub fn from_json(value: Value) -> DomainResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) if text.is_empty() => Ok(None),
            Value::String(text) => Ok(Some(Self::Raw(text))),
            Value::Object(map) if map.is_empty() => Ok(None),
            Value::Object(map) => Self::from_object(map).map(Some),
            _ => Err(DomainError::InvalidBodyTemplate(
                "Body template must be a string or an object".to_string(),
            )),
        }
    }

    fn from_object(mut map: Map<String, Value>) -> DomainResult<Self> {
        let tag = map.get("type").or_else(|| map.get("kind")).cloned();
        let Some(tag) = tag else {
            // Bare object written before templates were tagged.
            return Ok(Self::Object(Value::Object(map)));
        };

        let invalid = |reason: &str| DomainError::InvalidBodyTemplate(reason.to_string());
        match tag.as_str() {
            Some("raw") => match map.remove("value") {
                Some(Value::String(text)) => Ok(Self::Raw(text)),
                Some(Value::Null) | None => Err(invalid(MISSING_TYPE_OR_VALUE)),
                Some(other) => Ok(Self::Raw(other.to_string())),
            },
            Some("object") => match map.remove("value") {
                Some(value) => Ok(Self::Object(value)),
                None => Err(invalid(MISSING_TYPE_OR_VALUE)),
            },
            _ => Err(invalid(UNKNOWN_TYPE)),
        }
    }

    /// Returns the tagged JSON form used on disk.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Raw(text) => serde_json::json!({ "type": "raw", "value": text }),
            Self::Object(value) => serde_json::json!({ "type": "object", "value": value }),
        }
    }

    /// Returns the template text that placeholders are searched in.
    #[must_use]
    pub fn template_text(&self) -> String {
        match self {
            Self::Raw(text) => text.clone(),
            Self::Object(value) => value.to_string(),
        }
    }

    /// Returns whether the template carries no usable value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(text) => text.is_empty(),
            Self::Object(value) => value.is_null(),
        }
    }
}

impl Serialize for BodyTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BodyTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value)
            .map_err(D::Error::custom)?
            .ok_or_else(|| D::Error::custom("empty body template"))
    }
}

/// Deserialises an optional `bodyTemplate` field, mapping "no body" shapes
/// to `None`.
///
/// # Errors
///
/// Propagates normalisation failures as deserialisation errors.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<BodyTemplate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    BodyTemplate::from_json(value).map_err(D::Error::custom)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_plain_string_becomes_raw() {
        let body = BodyTemplate::from_json(json!("hello {{title}}")).unwrap();
        assert_eq!(body, Some(BodyTemplate::raw("hello {{title}}")));
    }

    #[test]
    fn test_empty_shapes_mean_no_body() {
        assert_eq!(BodyTemplate::from_json(Value::Null).unwrap(), None);
        assert_eq!(BodyTemplate::from_json(json!({})).unwrap(), None);
        assert_eq!(BodyTemplate::from_json(json!("")).unwrap(), None);
    }

    #[test]
    fn test_tagged_forms() {
        let raw = BodyTemplate::from_json(json!({"type": "raw", "value": "x"})).unwrap();
        assert_eq!(raw, Some(BodyTemplate::raw("x")));

        let object =
            BodyTemplate::from_json(json!({"kind": "object", "value": {"a": 1}})).unwrap();
        assert_eq!(object, Some(BodyTemplate::object(json!({"a": 1}))));
    }

    #[test]
    fn test_bare_object_is_migrated() {
        let body = BodyTemplate::from_json(json!({"text": "{{title}}"})).unwrap();
        assert_eq!(body, Some(BodyTemplate::object(json!({"text": "{{title}}"}))));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = BodyTemplate::from_json(json!({"type": "xml", "value": "<a/>"})).unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_TYPE);
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let err = BodyTemplate::from_json(json!({"type": "object"})).unwrap_err();
        assert_eq!(err.to_string(), MISSING_TYPE_OR_VALUE);
    }

    #[test]
    fn test_serializes_tagged() {
        let body = BodyTemplate::raw("abc");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"type": "raw", "value": "abc"})
        );
    }
}
