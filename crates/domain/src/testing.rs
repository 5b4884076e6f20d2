//! Response assertions.
//!
//! This module provides types for declaring checks on HTTP responses and
//! for reporting their outcome.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A check to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check the full status line, e.g. `HTTP/1.1 201 Created`.
    StatusLine {
        /// Expected status line.
        expected: String,
    },
    /// Check header exists and optionally its value.
    HeaderExists {
        /// Header name (case-insensitive).
        name: String,
        /// Optional expected value.
        value: Option<String>,
    },
    /// Check content type.
    ContentType {
        /// Expected content type (partial match).
        expected: String,
    },
    /// Check a field of the JSON body.
    JsonPath {
        /// Field path (e.g., "userId", "items[0].id", "$.user.name").
        path: String,
        /// Expected literal value; `None` only checks that the field exists.
        expected: Option<serde_json::Value>,
    },
    /// Check body is empty text or an empty JSON object/array.
    BodyEmpty,
    /// Check body is valid JSON.
    IsJson,
    /// Compare the whole body with a fixture file after whitespace normalization.
    MatchesFixture {
        /// Fixture path, relative to the fixtures directory.
        fixture: PathBuf,
    },
    /// Check response time.
    ResponseTime {
        /// Maximum allowed time in milliseconds.
        max_ms: u64,
    },
}

impl Assertion {
    /// Shorthand for an exact status code check.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode {
            expected: StatusExpectation::Exact(code),
        }
    }

    /// Shorthand for a status line check.
    #[must_use]
    pub fn status_line(expected: impl Into<String>) -> Self {
        Self::StatusLine {
            expected: expected.into(),
        }
    }

    /// Shorthand for a field equality check.
    #[must_use]
    pub fn field(path: impl Into<String>, expected: impl Into<serde_json::Value>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: Some(expected.into()),
        }
    }

    /// Shorthand for a fixture comparison.
    #[must_use]
    pub fn fixture(path: impl Into<PathBuf>) -> Self {
        Self::MatchesFixture {
            fixture: path.into(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::StatusLine { expected } => format!("Status line is '{expected}'"),
            Self::HeaderExists {
                name,
                value: Some(v),
            } => format!("Header '{name}' equals '{v}'"),
            Self::HeaderExists { name, value: None } => format!("Header '{name}' exists"),
            Self::ContentType { expected } => format!("Content-Type contains '{expected}'"),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
            Self::BodyEmpty => "Body is empty".to_string(),
            Self::IsJson => "Body is valid JSON".to_string(),
            Self::MatchesFixture { fixture } => {
                format!("Body matches fixture {}", fixture.display())
            }
            Self::ResponseTime { max_ms } => format!("Response time <= {max_ms}ms"),
        }
    }

    /// Returns the fixture this assertion reads, if any.
    #[must_use]
    pub fn fixture_path(&self) -> Option<&Path> {
        match self {
            Self::MatchesFixture { fixture } => Some(fixture),
            _ => None,
        }
    }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Subject name used when the whole body is compared.
pub const WHOLE_BODY: &str = "whole body";

/// Why an assertion failed.
///
/// `MalformedBody` means the service returned something that is not JSON;
/// `Mismatch` means it returned JSON with the wrong value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssertionFailure {
    /// The checked value differs from the expected one.
    #[error("{subject}: expected {expected}, got {actual}")]
    Mismatch {
        /// Field path, header name, "status", or [`WHOLE_BODY`].
        subject: String,
        /// Expected value as displayed.
        expected: String,
        /// Actual value as displayed.
        actual: String,
    },
    /// The body could not be parsed as JSON.
    #[error("response body is not valid JSON: {message}")]
    MalformedBody {
        /// Parser message.
        message: String,
    },
    /// The path does not resolve in the JSON tree.
    #[error("JSON path '{path}' not found")]
    PathNotFound {
        /// Field path.
        path: String,
    },
    /// The path expression itself is malformed.
    #[error("invalid JSON path '{path}': {message}")]
    InvalidPath {
        /// Field path.
        path: String,
        /// What is wrong with it.
        message: String,
    },
    /// A required part of the response is absent.
    #[error("{subject} not found")]
    Missing {
        /// What was looked for, e.g. "Header 'X-Id'".
        subject: String,
    },
    /// The fixture was not supplied to the verifier.
    #[error("fixture {fixture} was not loaded")]
    FixtureNotLoaded {
        /// Fixture path.
        fixture: String,
    },
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Failure reason if failed.
    pub failure: Option<AssertionFailure>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            failure: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            failure: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub const fn fail(assertion: Assertion, failure: AssertionFailure) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            failure: Some(failure),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        failure: AssertionFailure,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            failure: Some(failure),
        }
    }

    /// Failure message, if failed.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }
}

/// A named list of assertions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TestSuite {
    /// Test suite name.
    pub name: String,
    /// Assertions to run.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Whether to stop on first failure.
    #[serde(default)]
    pub stop_on_failure: bool,
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assertions: Vec::new(),
            stop_on_failure: false,
        }
    }

    /// Add an assertion to the suite.
    pub fn add(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Stop at the first failing assertion (builder pattern).
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Fixture paths referenced by the suite, in declaration order.
    pub fn fixtures(&self) -> impl Iterator<Item = &Path> {
        self.assertions.iter().filter_map(Assertion::fixture_path)
    }

    /// Check if the suite is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Get the number of assertions.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }
}

/// Results from running a test suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    /// Test suite that was run.
    pub suite_name: String,
    /// Individual assertion results.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl TestResults {
    /// Create new test results.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            suite_name: suite_name.into(),
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over failed assertion results.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
