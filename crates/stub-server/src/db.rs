//! Seed data for the stub service.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{StubError, StubResult};

/// A JSON object as stored in the seed document.
pub type Record = Map<String, Value>;

/// In-memory seed: the `posts` and `comments` collections of a `db.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Db {
    #[serde(default)]
    posts: Vec<Record>,
    #[serde(default)]
    comments: Vec<Record>,
}

impl Db {
    /// Builds a seed from explicit collections.
    #[must_use]
    pub const fn new(posts: Vec<Record>, comments: Vec<Record>) -> Self {
        Self { posts, comments }
    }

    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::InvalidSeed`] if the text is not a JSON object
    /// with array-of-object `posts` and `comments` members.
    pub fn from_json_str(text: &str) -> StubResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a seed document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::ReadSeed`] if the file cannot be read, or
    /// [`StubError::InvalidSeed`] if it does not parse.
    pub async fn load(path: impl AsRef<Path>) -> StubResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StubError::ReadSeed {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json_str(&text)
    }

    /// All posts in seed order.
    #[must_use]
    pub fn posts(&self) -> &[Record] {
        &self.posts
    }

    /// All comments in seed order.
    #[must_use]
    pub fn comments(&self) -> &[Record] {
        &self.comments
    }

    /// Finds a post by id.
    #[must_use]
    pub fn post(&self, id: u64) -> Option<&Record> {
        self.posts
            .iter()
            .find(|post| post.get("id").and_then(Value::as_u64) == Some(id))
    }

    /// Comments whose `postId` matches, compared loosely as text.
    pub fn comments_for<'a>(&'a self, post_id: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.comments
            .iter()
            .filter(move |comment| comment.get("postId").is_some_and(|v| loose_eq(v, post_id)))
    }

    /// Id handed out to the next created post.
    #[must_use]
    pub fn next_post_id(&self) -> u64 {
        self.posts.len() as u64 + 1
    }
}

fn loose_eq(value: &Value, text: &str) -> bool {
    match value {
        Value::String(s) => s == text,
        Value::Number(n) => n.to_string() == text,
        Value::Bool(b) => b.to_string() == text,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEED: &str = r#"{
        "posts": [
            {"userId": 1, "id": 1, "title": "first", "body": "one"},
            {"userId": 1, "id": 2, "title": "second", "body": "two"}
        ],
        "comments": [
            {"postId": 1, "id": 1, "name": "a", "email": "a@x.io", "body": "c1"},
            {"postId": 2, "id": 2, "name": "b", "email": "b@x.io", "body": "c2"},
            {"postId": 1, "id": 3, "name": "c", "email": "c@x.io", "body": "c3"}
        ]
    }"#;

    #[test]
    fn test_parse_seed() {
        let db = Db::from_json_str(SEED).unwrap();
        assert_eq!(db.posts().len(), 2);
        assert_eq!(db.comments().len(), 3);
        assert_eq!(db.next_post_id(), 3);
    }

    #[test]
    fn test_find_post() {
        let db = Db::from_json_str(SEED).unwrap();
        assert_eq!(db.post(2).and_then(|p| p.get("title")), Some(&Value::from("second")));
        assert!(db.post(9).is_none());
    }

    #[test]
    fn test_comments_for_post() {
        let db = Db::from_json_str(SEED).unwrap();
        let ids: Vec<_> = db
            .comments_for("1")
            .filter_map(|c| c.get("id").and_then(Value::as_u64))
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(db.comments_for("abc").count(), 0);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let db = Db::from_json_str("{}").unwrap();
        assert!(db.posts().is_empty());
        assert_eq!(db.next_post_id(), 1);
    }

    #[test]
    fn test_invalid_seed() {
        let result = Db::from_json_str(r#"{"posts": 3}"#);
        assert!(matches!(result, Err(StubError::InvalidSeed(_))));
    }
}
