//! Field path resolution over `serde_json::Value`.
//!
//! Grammar: an optional leading `$`, then segments separated by `.`; each
//! segment is a key optionally followed by `[index]` accessors, or bare
//! accessors. Examples: `userId`, `items[0].id`, `$.user.name`, `[2].email`,
//! `matrix[1][0]`.

use serde_json::Value;
use thiserror::Error;

/// A malformed path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonPathError {
    /// Nothing to resolve.
    #[error("path is empty")]
    Empty,
    /// Two dots in a row, or a trailing dot.
    #[error("empty segment at position {0}")]
    EmptySegment(usize),
    /// `[` without a matching `]`.
    #[error("unclosed '[' in segment '{0}'")]
    UnclosedBracket(String),
    /// Index is not a non-negative integer.
    #[error("invalid array index '{0}'")]
    InvalidIndex(String),
    /// Text after `]` that does not start another accessor.
    #[error("unexpected '{0}' after ']'")]
    TrailingCharacters(String),
}

/// One step into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Object member.
    Key(String),
    /// Array element.
    Index(usize),
}

/// Parses a path expression into steps. `$` alone is the root (no steps).
///
/// # Errors
///
/// Returns `JsonPathError` when the expression is malformed.
pub fn parse_path(path: &str) -> Result<Vec<PathStep>, JsonPathError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(JsonPathError::Empty);
    }

    let rest = match path.strip_prefix('$') {
        Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
        None => path,
    };
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let mut steps = Vec::new();
    for (position, segment) in split_path_segments(rest).into_iter().enumerate() {
        if segment.is_empty() {
            return Err(JsonPathError::EmptySegment(position));
        }
        parse_segment(&segment, &mut steps)?;
    }
    Ok(steps)
}

/// Resolves `path` in `json`. `Ok(None)` means the path is valid but absent.
///
/// # Errors
///
/// Returns `JsonPathError` when the expression is malformed.
pub fn resolve<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, JsonPathError> {
    let steps = parse_path(path)?;
    let mut current = json;
    for step in &steps {
        let next = match step {
            PathStep::Key(key) => current.as_object().and_then(|map| map.get(key)),
            PathStep::Index(index) => current.as_array().and_then(|items| items.get(*index)),
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => segments.push(std::mem::take(&mut current)),
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    segments.push(current);

    segments
}

/// Parse "field", "field[0]", "field[0][1]" or "[0]" into steps.
fn parse_segment(segment: &str, steps: &mut Vec<PathStep>) -> Result<(), JsonPathError> {
    let (name, mut accessors) = segment
        .find('[')
        .map_or((segment, ""), |start| segment.split_at(start));

    if !name.is_empty() {
        steps.push(PathStep::Key(name.to_string()));
    }

    while !accessors.is_empty() {
        let Some(inner) = accessors.strip_prefix('[') else {
            return Err(JsonPathError::TrailingCharacters(accessors.to_string()));
        };
        let Some(end) = inner.find(']') else {
            return Err(JsonPathError::UnclosedBracket(segment.to_string()));
        };
        let index = &inner[..end];
        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|_| JsonPathError::InvalidIndex(index.to_string()))?;
        steps.push(PathStep::Index(index));
        accessors = &inner[end + 1..];
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn post() -> Value {
        json!({
            "userId": 5,
            "id": 50,
            "title": "repellendus",
            "items": [{"id": 1}, {"id": 2}],
            "matrix": [[1, 2], [3, 4]],
            "user": {"name": "John", "tags": ["a", "b"]}
        })
    }

    #[test]
    fn test_bare_and_dollar_paths() {
        let json = post();
        assert_eq!(resolve(&json, "userId"), Ok(Some(&json!(5))));
        assert_eq!(resolve(&json, "$.userId"), Ok(Some(&json!(5))));
        assert_eq!(resolve(&json, "$userId"), Ok(Some(&json!(5))));
        assert_eq!(resolve(&json, "$"), Ok(Some(&json)));
    }

    #[test]
    fn test_nested_and_indexed() {
        let json = post();
        assert_eq!(resolve(&json, "items[0].id"), Ok(Some(&json!(1))));
        assert_eq!(resolve(&json, "$.user.name"), Ok(Some(&json!("John"))));
        assert_eq!(resolve(&json, "user.tags[1]"), Ok(Some(&json!("b"))));
        assert_eq!(resolve(&json, "matrix[1][0]"), Ok(Some(&json!(3))));
    }

    #[test]
    fn test_root_array_access() {
        let json = json!([{"email": "a@b.c"}, {"email": "d@e.f"}]);
        assert_eq!(resolve(&json, "[1].email"), Ok(Some(&json!("d@e.f"))));
        assert_eq!(resolve(&json, "$[0].email"), Ok(Some(&json!("a@b.c"))));
    }

    #[test]
    fn test_absent_paths() {
        let json = post();
        assert_eq!(resolve(&json, "missing"), Ok(None));
        assert_eq!(resolve(&json, "items[5].id"), Ok(None));
        assert_eq!(resolve(&json, "userId.inner"), Ok(None));
        assert_eq!(resolve(&json, "title[0]"), Ok(None));
    }

    #[test]
    fn test_malformed_paths() {
        let json = post();
        assert_eq!(resolve(&json, ""), Err(JsonPathError::Empty));
        assert_eq!(resolve(&json, "a..b"), Err(JsonPathError::EmptySegment(1)));
        assert_eq!(resolve(&json, "a."), Err(JsonPathError::EmptySegment(1)));
        assert_eq!(
            resolve(&json, "items[0"),
            Err(JsonPathError::UnclosedBracket("items[0".to_string()))
        );
        assert_eq!(
            resolve(&json, "items[x]"),
            Err(JsonPathError::InvalidIndex("x".to_string()))
        );
        assert_eq!(
            resolve(&json, "items[0]id"),
            Err(JsonPathError::TrailingCharacters("id".to_string()))
        );
    }

    #[test]
    fn test_dots_inside_brackets_do_not_split() {
        assert_eq!(
            parse_path("a[1.5]"),
            Err(JsonPathError::InvalidIndex("1.5".to_string()))
        );
    }
}
