//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the harness.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use apiprobe_application::ports::{HttpClient, HttpClientError};
use apiprobe_domain::{
    DomainError,
    request::{HttpMethod, RequestSpec},
    response::ResponseSpec,
};
use reqwest::{Client, Method, Url};
use tracing::{debug, trace};

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// HTTP client implementation using reqwest.
///
/// Wraps one `reqwest::Client`, so connections are pooled across scenarios
/// the way reqwest does by default.
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client.
    ///
    /// Configuration:
    /// - Request timeout: `timeout_ms`
    /// - Redirects: reqwest default policy
    /// - Proxies: taken from the environment
    /// - Protocol: HTTP/1.1 only, so status lines read `HTTP/1.1 ...`
    /// - User-Agent: "apiprobe/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(timeout_ms: u64) -> Result<Self, HttpClientError> {
        Self::build(Client::builder(), timeout_ms)
    }

    /// Creates a client that ignores proxy environment variables.
    ///
    /// Used for the loopback stub, which a corporate proxy cannot reach.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn without_proxy(timeout_ms: u64) -> Result<Self, HttpClientError> {
        Self::build(Client::builder().no_proxy(), timeout_ms)
    }

    fn build(builder: reqwest::ClientBuilder, timeout_ms: u64) -> Result<Self, HttpClientError> {
        let client = builder
            .user_agent(concat!("apiprobe/", env!("CARGO_PKG_VERSION")))
            .http1_only()
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout_ms })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Formats `HTTP/1.1 201 Created` from the received status and version.
    fn status_line(version: reqwest::Version, status: reqwest::StatusCode) -> String {
        let reason = status.canonical_reason().unwrap_or("Unknown");
        format!("{version:?} {} {reason}", status.as_u16())
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str().map(str::to_owned))
                .unwrap_or_else(|| "unknown".to_string())
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
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

        if error.is_body() || error.is_decode() {
            return HttpClientError::Body(error_chain(error));
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error and its sources; reqwest keeps the OS reason in the chain.
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

impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = request.parsed_url().map_err(|e| match e {
            DomainError::InvalidUrl(message) => HttpClientError::InvalidUrl(message),
            other => HttpClientError::InvalidUrl(other.to_string()),
        })?;
        let body = request
            .body
            .to_json_string()
            .map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(self.timeout_ms));

        for header in request.headers.iter() {
            header
                .validate()
                .map_err(|e| HttpClientError::Other(e.to_string()))?;
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }

        if !request.headers.contains("content-type")
            && let Some(content_type) = request.content_type()
        {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        if let Some(body) = body {
            trace!(%body, "request body");
            builder = builder.body(body);
        }

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;
        let duration = start.elapsed();

        let status = response.status();
        let status_line = Self::status_line(response.version(), status);

        let mut response_headers: HashMap<String, String> = HashMap::new();
        for (name, value) in response.headers() {
            let value = value.to_str().unwrap_or("<binary>");
            response_headers
                .entry(name.to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Body(error_chain(&e)))?
            .to_vec();

        debug!(
            method = %request.method,
            url = %request.url,
            %status_line,
            bytes = body_bytes.len(),
            elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "HTTP exchange complete"
        );

        Ok(
            ResponseSpec::new(status.as_u16(), response_headers, body_bytes, duration)
                .with_status_line(status_line),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiprobe_domain::Endpoint;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_status_line_format() {
        assert_eq!(
            ReqwestHttpClient::status_line(reqwest::Version::HTTP_11, reqwest::StatusCode::CREATED),
            "HTTP/1.1 201 Created"
        );
        assert_eq!(
            ReqwestHttpClient::status_line(reqwest::Version::HTTP_11, reqwest::StatusCode::OK),
            "HTTP/1.1 200 OK"
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new(DEFAULT_TIMEOUT_MS).is_ok());
        assert!(ReqwestHttpClient::without_proxy(DEFAULT_TIMEOUT_MS).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported() {
        let client = ReqwestHttpClient::new(1_000).expect("client");
        let request = RequestSpec::get(&Endpoint::new("not a url", "/posts"));

        let result = client.execute(&request).await;

        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .map(|a| a.port())
            .expect("ephemeral port");
        let client = ReqwestHttpClient::without_proxy(2_000).expect("client");
        let request = RequestSpec::get(&Endpoint::new(format!("http://127.0.0.1:{port}"), "/posts"));

        let result = client.execute(&request).await;

        assert!(matches!(
            result,
            Err(HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_))
        ));
    }
}
