//! HTTP Method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// HTTP methods an endpoint may declare.
///
/// Values outside the supported set survive deserialisation as
/// [`HttpMethod::Unsupported`] so that the validator can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// Anything else, kept verbatim.
    Unsupported(String),
}

impl HttpMethod {
    /// Returns all supported HTTP methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Get, Self::Post, Self::Put, Self::Delete, Self::Patch]
    }

    /// Returns whether this method is one of the five supported methods.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Returns whether a body may be sent with this method.
    ///
    /// Only GET suppresses the body; every other method forwards it.
    #[must_use]
    pub const fn allows_body(&self) -> bool {
        !matches!(self, Self::Get)
    }

    /// Returns the method as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Unsupported(other) => other,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match Self::from(s.to_string()) {
            Self::Unsupported(other) => Err(DomainError::UnsupportedMethod(other)),
            method => Ok(method),
        }
    }
}

impl From<String> for HttpMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<HttpMethod> for String {
    fn from(value: HttpMethod) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_from_str() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
    }

    #[test]
    fn test_method_is_case_sensitive() {
        assert!("get".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_unknown_method_survives_deserialization() {
        let method: HttpMethod = serde_json::from_str("\"HEAD\"").unwrap();
        assert_eq!(method, HttpMethod::Unsupported("HEAD".to_string()));
        assert!(!method.is_supported());
        assert_eq!(serde_json::to_string(&method).unwrap(), "\"HEAD\"");
    }

    #[test]
    fn test_allows_body() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Delete.allows_body());
    }
}
