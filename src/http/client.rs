use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::catalog::HttpMethod;

/// Default backend used when no URL is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9000";

/// A builder for [`ReqwestHttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<ReqwestHttpClient, HttpError> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Url::parse(&base_url).map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ReqwestHttpClient {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: String,
}

impl ReqwestHttpClient {
    /// Creates a new builder.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// The backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a request path onto the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| HttpError::InvalidUrl(format!("{joined}: {e}")))
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Decodes a response body as JSON, falling back to the raw text.
fn decode_body(text: String) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = self.endpoint(&request.path)?;
        debug!(method = %request.method, %url, "Sending backend request");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))?;

        debug!(status, "Backend responded");

        Ok(HttpResponse::new(status, decode_body(text)))
    }
}
