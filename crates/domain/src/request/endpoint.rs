//! Base URL plus resource path.

use serde::{Deserialize, Serialize};

/// A target resource on the service under test.
///
/// The full URL is the plain concatenation of `base_url` and `path`; no
/// slashes are added or removed, so `/posts/` and `/posts` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Scheme and authority, e.g. `https://jsonplaceholder.typicode.com`.
    pub base_url: String,
    /// Path and optional query, e.g. `/comments?postId=1`.
    pub path: String,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
        }
    }

    /// Returns the full request URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}
