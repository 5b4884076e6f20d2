//! Response verification port

use apiprobe_domain::{FixtureSet, ResponseSpec, TestResults, TestSuite};

/// Port for the assertion engine.
///
/// Verification is pure: all fixtures the suite references are loaded
/// beforehand and handed over in `fixtures`.
pub trait ResponseVerifier: Send + Sync {
    /// Runs every assertion of `suite` against `response`.
    fn verify(&self, suite: &TestSuite, response: &ResponseSpec, fixtures: &FixtureSet)
    -> TestResults;
}
