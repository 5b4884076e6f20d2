//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces test results.

use std::path::Path;
use std::time::Instant;

use apiprobe_application::ports::ResponseVerifier;
use apiprobe_domain::{
    Assertion, AssertionFailure, AssertionResult, FixtureSet, ResponseSpec, StatusExpectation,
    TestResults, TestSuite, WHOLE_BODY,
};
use serde_json::Value;
use tracing::debug;

use super::json_path;
use super::normalize::{normalize_whitespace, pretty_body};

/// Test runner that executes assertions against responses.
#[derive(Debug, Default)]
pub struct TestRunner {
    /// Whether to stop on first failure.
    stop_on_failure: bool,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Set whether to stop on first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Run a test suite against a response.
    #[must_use]
    pub fn run(
        &self,
        suite: &TestSuite,
        response: &ResponseSpec,
        fixtures: &FixtureSet,
    ) -> TestResults {
        let start = Instant::now();
        let mut results = Vec::with_capacity(suite.assertions.len());

        for assertion in &suite.assertions {
            let result = self.run_assertion(assertion, response, fixtures);
            debug!(
                assertion = %assertion.description(),
                passed = result.passed,
                "assertion evaluated"
            );
            let failed = !result.passed;
            results.push(result);

            if failed && (self.stop_on_failure || suite.stop_on_failure) {
                break;
            }
        }

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        TestResults::new(&suite.name, results, duration_ms)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        fixtures: &FixtureSet,
    ) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, expected)
            }
            Assertion::StatusLine { expected } => {
                Self::check_status_line(assertion, response, expected)
            }
            Assertion::HeaderExists { name, value } => {
                Self::check_header_exists(assertion, response, name, value.as_deref())
            }
            Assertion::ContentType { expected } => {
                Self::check_content_type(assertion, response, expected)
            }
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::BodyEmpty => Self::check_body_empty(assertion, response),
            Assertion::IsJson => Self::check_is_json(assertion, response),
            Assertion::MatchesFixture { fixture } => {
                Self::check_fixture(assertion, response, fixture, fixtures)
            }
            Assertion::ResponseTime { max_ms } => {
                Self::check_response_time(assertion, response, *max_ms)
            }
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &StatusExpectation,
    ) -> AssertionResult {
        let actual = response.status;
        if expected.matches(actual) {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                AssertionFailure::Mismatch {
                    subject: "status code".to_string(),
                    expected: expected.description(),
                    actual: actual.to_string(),
                },
            )
        }
    }

    fn check_status_line(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &str,
    ) -> AssertionResult {
        if response.status_line == expected {
            AssertionResult::pass_with_value(assertion.clone(), response.status_line.clone())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                response.status_line.clone(),
                AssertionFailure::Mismatch {
                    subject: "status line".to_string(),
                    expected: format!("'{expected}'"),
                    actual: format!("'{}'", response.status_line),
                },
            )
        }
    }

    fn check_header_exists(
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
        expected_value: Option<&str>,
    ) -> AssertionResult {
        match (response.get_header(name), expected_value) {
            (Some(actual), Some(expected)) if actual != expected => {
                AssertionResult::fail_with_value(
                    assertion.clone(),
                    actual.clone(),
                    AssertionFailure::Mismatch {
                        subject: format!("header '{name}'"),
                        expected: format!("'{expected}'"),
                        actual: format!("'{actual}'"),
                    },
                )
            }
            (Some(actual), _) => AssertionResult::pass_with_value(assertion.clone(), actual.clone()),
            (None, _) => AssertionResult::fail(
                assertion.clone(),
                AssertionFailure::Missing {
                    subject: format!("Header '{name}'"),
                },
            ),
        }
    }

    fn check_content_type(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &str,
    ) -> AssertionResult {
        match &response.content_type {
            Some(actual) if actual.contains(expected) => {
                AssertionResult::pass_with_value(assertion.clone(), actual.clone())
            }
            Some(actual) => AssertionResult::fail_with_value(
                assertion.clone(),
                actual.clone(),
                AssertionFailure::Mismatch {
                    subject: "Content-Type".to_string(),
                    expected: format!("containing '{expected}'"),
                    actual: format!("'{actual}'"),
                },
            ),
            None => AssertionResult::fail(
                assertion.clone(),
                AssertionFailure::Missing {
                    subject: "Content-Type header".to_string(),
                },
            ),
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: Option<&Value>,
    ) -> AssertionResult {
        let json = match response.json() {
            Ok(json) => json,
            Err(message) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    AssertionFailure::MalformedBody {
                        message: message.to_string(),
                    },
                );
            }
        };

        match json_path::resolve(json, path) {
            Ok(Some(value)) => match expected {
                Some(expected_value) if value != expected_value => {
                    AssertionResult::fail_with_value(
                        assertion.clone(),
                        value.to_string(),
                        AssertionFailure::Mismatch {
                            subject: path.to_string(),
                            expected: expected_value.to_string(),
                            actual: value.to_string(),
                        },
                    )
                }
                _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
            },
            Ok(None) => AssertionResult::fail(
                assertion.clone(),
                AssertionFailure::PathNotFound {
                    path: path.to_string(),
                },
            ),
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                AssertionFailure::InvalidPath {
                    path: path.to_string(),
                    message: e.to_string(),
                },
            ),
        }
    }

    /// Empty text, whitespace only, `{}` and `[]` all count as empty.
    fn check_body_empty(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        let empty = response.body.trim().is_empty()
            || match response.json() {
                Ok(Value::Object(map)) => map.is_empty(),
                Ok(Value::Array(items)) => items.is_empty(),
                _ => false,
            };

        if empty {
            AssertionResult::pass_with_value(assertion.clone(), response.body.clone())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                preview(&response.body),
                AssertionFailure::Mismatch {
                    subject: WHOLE_BODY.to_string(),
                    expected: "empty".to_string(),
                    actual: preview(&response.body),
                },
            )
        }
    }

    fn check_is_json(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match response.json() {
            Ok(_) => AssertionResult::pass(assertion.clone()),
            Err(message) => AssertionResult::fail(
                assertion.clone(),
                AssertionFailure::MalformedBody {
                    message: message.to_string(),
                },
            ),
        }
    }

    /// Pretty-prints the body, normalizes both sides and requires equality.
    fn check_fixture(
        assertion: &Assertion,
        response: &ResponseSpec,
        fixture_path: &Path,
        fixtures: &FixtureSet,
    ) -> AssertionResult {
        let Some(fixture) = fixtures.get(fixture_path) else {
            return AssertionResult::fail(
                assertion.clone(),
                AssertionFailure::FixtureNotLoaded {
                    fixture: fixture_path.display().to_string(),
                },
            );
        };

        let actual = normalize_whitespace(&pretty_body(&response.body));
        let expected = normalize_whitespace(fixture.expected_body());

        if actual == expected {
            return AssertionResult::pass(assertion.clone());
        }

        let (line, expected_line, actual_line) = first_difference(&expected, &actual);
        AssertionResult::fail_with_value(
            assertion.clone(),
            preview(&actual),
            AssertionFailure::Mismatch {
                subject: WHOLE_BODY.to_string(),
                expected: format!("line {line}: {}", describe_line(expected_line)),
                actual: format!("line {line}: {}", describe_line(actual_line)),
            },
        )
    }

    fn check_response_time(
        assertion: &Assertion,
        response: &ResponseSpec,
        max_ms: u64,
    ) -> AssertionResult {
        let actual_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX);
        if actual_ms <= max_ms {
            AssertionResult::pass_with_value(assertion.clone(), format!("{actual_ms}ms"))
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                format!("{actual_ms}ms"),
                AssertionFailure::Mismatch {
                    subject: "response time".to_string(),
                    expected: format!("<= {max_ms}ms"),
                    actual: format!("{actual_ms}ms"),
                },
            )
        }
    }
}

impl ResponseVerifier for TestRunner {
    fn verify(
        &self,
        suite: &TestSuite,
        response: &ResponseSpec,
        fixtures: &FixtureSet,
    ) -> TestResults {
        self.run(suite, response, fixtures)
    }
}

/// First 1-based line where the texts differ; `None` is past the end.
///
/// Splits on `\n` only, so a trailing newline or a `\r` counts as content.
fn first_difference<'a>(
    expected: &'a str,
    actual: &'a str,
) -> (usize, Option<&'a str>, Option<&'a str>) {
    let mut expected_lines = expected.split('\n');
    let mut actual_lines = actual.split('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => line += 1,
            (e, a) => return (line, e, a),
        }
    }
}

fn describe_line(line: Option<&str>) -> String {
    match line.map(|text| text.trim_matches(' ')) {
        None => "<end of body>".to_string(),
        Some("") => "<empty line>".to_string(),
        Some(text) => text.replace('\r', "\\r"),
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(100) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
