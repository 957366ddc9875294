//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. It sends one request per
//! call, applies the per-request timeout and never retries.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bridge_application::ports::{HttpClient, HttpClientError, HttpRequest, HttpResponse};
use bridge_domain::HttpMethod;
use reqwest::{Client, Method, Url};

const USER_AGENT: &str = concat!("api-bridge/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: `api-bridge/<version>`
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the endpoint method to a reqwest `Method`.
    fn to_reqwest_method(method: &HttpMethod) -> Result<Method, HttpClientError> {
        match method {
            HttpMethod::Get => Ok(Method::GET),
            HttpMethod::Post => Ok(Method::POST),
            HttpMethod::Put => Ok(Method::PUT),
            HttpMethod::Patch => Ok(Method::PATCH),
            HttpMethod::Delete => Ok(Method::DELETE),
            HttpMethod::Unsupported(other) => {
                Err(HttpClientError::Other(format!("unsupported HTTP method: {other}")))
            }
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_builder() {
            return HttpClientError::InvalidHeader(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

/// Joins an error with all of its sources.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
        let method = Self::to_reqwest_method(&request.method)?;
        let timeout_ms = request.timeout_ms;

        let mut builder = self
            .client
            .request(method, url)
            .timeout(Duration::from_millis(timeout_ms));

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?;

        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            bytes = body.len(),
            "response received"
        );

        Ok(HttpResponse::new(status.as_u16(), status_text, body))
    }
}
