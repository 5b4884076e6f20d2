//! HTTP Request body types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Content type sent with JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP request body.
///
/// JSON bodies are key-ordered maps: keys are unique, and inserting an
/// existing key replaces its value without moving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON object body
    Json(Map<String, Value>),
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates an empty JSON object body.
    #[must_use]
    pub fn json_object() -> Self {
        Self::Json(Map::new())
    }

    /// Adds or replaces a field (builder pattern).
    ///
    /// Turns a `None` body into a JSON object first.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        match self {
            Self::Json(map) => {
                map.insert(key.into(), value.into());
            }
            Self::None => {
                let mut map = Map::new();
                map.insert(key.into(), value.into());
                *self = Self::Json(map);
            }
        }
    }

    /// Returns whether there is no body to send.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the implied content type, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }

    /// Serializes the body for the wire. `None` serializes to `None`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if serialization fails.
    pub fn to_json_string(&self) -> DomainResult<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Json(map) => serde_json::to_string(map)
                .map(Some)
                .map_err(|e| DomainError::InvalidBody(e.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_body_keeps_insertion_order() {
        let body = RequestBody::json_object()
            .with("userId", 1)
            .with("title", "New created post title")
            .with("body", "New created post body");

        assert_eq!(
            body.to_json_string().unwrap().unwrap(),
            r#"{"userId":1,"title":"New created post title","body":"New created post body"}"#
        );
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let body = RequestBody::json_object()
            .with("a", 1)
            .with("b", 2)
            .with("a", "one");

        assert_eq!(body.to_json_string().unwrap().unwrap(), r#"{"a":"one","b":2}"#);
    }

    #[test]
    fn test_none_body() {
        let body = RequestBody::none();
        assert!(body.is_none());
        assert_eq!(body.content_type(), None);
        assert_eq!(body.to_json_string().unwrap(), None);
    }

    #[test]
    fn test_insert_promotes_none_to_json() {
        let mut body = RequestBody::none();
        body.insert("title", "x");
        assert_eq!(body.content_type(), Some(JSON_CONTENT_TYPE));
    }
}
