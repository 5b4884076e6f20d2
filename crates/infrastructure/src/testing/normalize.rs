//! Whitespace normalization for whole-body comparisons.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

#[allow(clippy::expect_used)]
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[ ]+").expect("space-run pattern is valid"));

/// Collapses every run of space characters into a single space.
///
/// Only U+0020 is affected: newlines, tabs, key order and number
/// formatting are left exactly as they are.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    SPACE_RUNS.replace_all(text, " ").into_owned()
}

/// Pretty-prints a JSON body; anything that is not JSON is returned as-is.
///
/// Key order and number literals are preserved, so the output only
/// differs from the input in layout.
#[must_use]
pub fn pretty_body(body: &str) -> Cow<'_, str> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .map_or(Cow::Borrowed(body), Cow::Owned)
}
