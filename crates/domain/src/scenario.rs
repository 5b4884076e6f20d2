//! Contract scenarios: one request, one suite of assertions.

use serde::{Deserialize, Serialize};

use crate::request::RequestSpec;
use crate::testing::{Assertion, TestResults, TestSuite};

/// A named request together with the checks its response must pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name, e.g. "Successfully get one post".
    pub name: String,
    /// Request to send.
    pub request: RequestSpec,
    /// Assertions on the response.
    pub suite: TestSuite,
}

impl Scenario {
    /// Creates a scenario with an empty suite named after it.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        let name = name.into();
        Self {
            suite: TestSuite::new(name.clone()),
            name,
            request,
        }
    }

    /// Adds an assertion (builder pattern).
    #[must_use]
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.suite.add(assertion);
        self
    }

    /// Adds several assertions (builder pattern).
    #[must_use]
    pub fn expect_all(mut self, assertions: impl IntoIterator<Item = Assertion>) -> Self {
        self.suite.assertions.extend(assertions);
        self
    }
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub scenario: String,
    /// Received status code.
    pub status: u16,
    /// Received status line.
    pub status_line: String,
    /// Assertion outcomes.
    pub results: TestResults,
}

impl ScenarioReport {
    /// A scenario passes only when every assertion passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.results.all_passed()
    }
}
