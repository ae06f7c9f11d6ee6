pub mod client;

pub use client::{DEFAULT_BACKEND_URL, HttpClientBuilder, ReqwestHttpClient};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::catalog::HttpMethod;

/// A request ready to be sent to the commerce backend.
///
/// `path` is relative to the backend base URL and already has path
/// parameters substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Returns the value of the first header with the given name
    /// (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The backend's response, returned to tool callers as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body, or the raw text as a JSON string when the body is
    /// not JSON. Empty bodies decode to `null`.
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures raised by the HTTP capability itself.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Connection, TLS, or protocol failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend URL or request path could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The response body could not be read
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// The capability every tool dispatches through.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the backend's response, whatever its status.
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// A shared HTTP capability.
pub type DynHttpClient = Arc<dyn HttpClient>;
