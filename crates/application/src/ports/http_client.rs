//! HTTP Client port

use async_trait::async_trait;
use bridge_domain::HttpMethod;
use indexmap::IndexMap;

/// A fully interpolated request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Header values in template order.
    pub headers: IndexMap<String, String>,
    /// Wire body.
    pub body: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

/// A response as received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase, empty when unknown.
    pub status_text: String,
    /// Body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Returns whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failures.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed after interpolation.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value is not valid on the wire.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request exceeded its timeout.
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Host name resolution failed.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error text.
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure (TLS, reset).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Anything not covered above.
    #[error("{0}")]
    Other(String),
}

/// Port for issuing HTTP requests.
///
/// Implementations send exactly one request and never retry.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and returns whatever the server answered, including
    /// non-2xx statuses.
    ///
    /// # Errors
    ///
    /// Returns an error when no response was received.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError>;
}
