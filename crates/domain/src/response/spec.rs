//! Response specification type
//!
//! Contains types for representing HTTP responses including
//! status codes, status line, headers, body, and timing information.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP status code with its reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            100 => "Continue",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// HTTP response specification.
///
/// Owned by the scenario that issued the request and dropped once its
/// assertions have run. The JSON tree is parsed on first use and cached,
/// parse failure included. A body that is not valid UTF-8 is kept as lossy
/// text for display but never parses as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Full status line, e.g. `HTTP/1.1 201 Created`.
    pub status_line: String,
    /// Response headers (names lowercased by the transport).
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
    /// Response time.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// Content-Type header value (extracted for convenience).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip)]
    utf8_error: Option<String>,
    #[serde(skip)]
    parsed: OnceLock<Result<Value, String>>,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    ///
    /// The status line defaults to `HTTP/1.1 <code> <reason>`; transports
    /// that know the negotiated version use [`Self::with_status_line`].
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let status_code = status.into();
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());

        let (body, utf8_error) = match String::from_utf8(body) {
            Ok(body) => (body, None),
            Err(e) => {
                let message = e.utf8_error().to_string();
                (String::from_utf8_lossy(e.as_bytes()).into_owned(), Some(message))
            }
        };

        Self {
            status: status_code.as_u16(),
            status_line: format!("HTTP/1.1 {status_code}"),
            headers,
            body,
            duration,
            content_type,
            utf8_error,
            parsed: OnceLock::new(),
        }
    }

    /// Overrides the status line (builder pattern).
    #[must_use]
    pub fn with_status_line(mut self, status_line: impl Into<String>) -> Self {
        self.status_line = status_line.into();
        self
    }

    /// Returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns the parser message when the body is not well-formed JSON,
    /// or the decode error when it was not valid UTF-8.
    pub fn json(&self) -> Result<&Value, &str> {
        self.parsed
            .get_or_init(|| match &self.utf8_error {
                Some(e) => Err(format!("body is not valid UTF-8: {e}")),
                None => serde_json::from_str(&self.body).map_err(|e| e.to_string()),
            })
            .as_ref()
            .map_err(String::as_str)
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Returns a human-readable duration string (e.g., "124 ms").
    #[must_use]
    pub fn duration_display(&self) -> String {
        let millis = self.duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else {
            format!("{:.2} s", self.duration.as_secs_f64())
        }
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self::new(0, HashMap::new(), Vec::new(), Duration::ZERO)
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
