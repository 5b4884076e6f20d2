//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Endpoint, Header, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Complete specification for an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Full target URL
    pub url: String,
    /// Explicit HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: &Endpoint) -> Self {
        Self {
            method,
            url: endpoint.url(),
            headers: Headers::new(),
            body: RequestBody::none(),
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(endpoint: &Endpoint) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// Creates a POST request with the given body.
    #[must_use]
    pub fn post(endpoint: &Endpoint, body: RequestBody) -> Self {
        Self::new(HttpMethod::Post, endpoint).with_body(body)
    }

    /// Creates a PUT request with the given body.
    #[must_use]
    pub fn put(endpoint: &Endpoint, body: RequestBody) -> Self {
        Self::new(HttpMethod::Put, endpoint).with_body(body)
    }

    /// Creates a PATCH request with the given body.
    #[must_use]
    pub fn patch(endpoint: &Endpoint, body: RequestBody) -> Self {
        Self::new(HttpMethod::Patch, endpoint).with_body(body)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(endpoint: &Endpoint) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Parses the target URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` when the URL is malformed or not http(s).
    pub fn parsed_url(&self) -> DomainResult<Url> {
        let url =
            Url::parse(&self.url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{other}': {}",
                self.url
            ))),
        }
    }

    /// Content type to send: an explicit header wins over the body's own.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .or_else(|| self.body.content_type())
    }
}
