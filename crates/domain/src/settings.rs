//! Persisted settings
//!
//! The whole settings object is owned by the host's key-value persistence;
//! this module only describes its shape and defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TIMEOUT_MS, DEFAULT_TOKEN_NAME};
use crate::endpoint::EndpointRecord;

/// Named tokens available to every endpoint's interpolation pass.
pub type TokenMap = BTreeMap<String, String>;

/// Settings object: ordered endpoint list, tokens and runtime options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Endpoint records in display order.
    #[serde(default)]
    pub endpoints: Vec<EndpointRecord>,

    /// Stored tokens.
    #[serde(default)]
    pub tokens: TokenMap,

    /// Verbose diagnostics.
    #[serde(default)]
    pub debug_mode: bool,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Settings {
    /// Returns the token substituted for `{{token}}`, if stored.
    #[must_use]
    pub fn default_token(&self) -> Option<&str> {
        self.tokens.get(DEFAULT_TOKEN_NAME).map(String::as_str)
    }

    /// Looks up an endpoint by id.
    #[must_use]
    pub fn endpoint(&self, id: &str) -> Option<&EndpointRecord> {
        self.endpoints.iter().find(|endpoint| endpoint.id == id)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            tokens: TokenMap::new(),
            debug_mode: false,
            timeout_ms: default_timeout_ms(),
        }
    }
}
