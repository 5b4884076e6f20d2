//! Run Scenario use case
//!
//! Drives one contract scenario: send the request, load the fixtures the
//! suite refers to, then hand everything to the verifier.

use std::sync::Arc;

use apiprobe_domain::{DomainError, FixtureSet, RequestSpec, Scenario, ScenarioReport};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ports::{FixtureError, FixtureLoader, HttpClient, HttpClientError, ResponseVerifier};

/// Errors that abort a scenario before any assertion runs.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is malformed or not http(s).
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(#[from] HttpClientError),

    /// A referenced fixture could not be read.
    #[error("{0}")]
    Fixture(#[from] FixtureError),
}

/// Use case for running a scenario.
///
/// Scenarios share nothing but the injected adapters, so one instance can
/// run any number of them in any order.
pub struct RunScenario<C: HttpClient, F: FixtureLoader, V: ResponseVerifier> {
    client: Arc<C>,
    fixtures: Arc<F>,
    verifier: Arc<V>,
}

impl<C: HttpClient, F: FixtureLoader, V: ResponseVerifier> RunScenario<C, F, V> {
    /// Creates the use case from its adapters.
    pub const fn new(client: Arc<C>, fixtures: Arc<F>, verifier: Arc<V>) -> Self {
        Self {
            client,
            fixtures,
            verifier,
        }
    }

    /// Runs the scenario.
    ///
    /// Assertion failures are reported in the returned `ScenarioReport`;
    /// only transport and fixture problems are errors.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError` if the request is invalid, the transport
    /// fails, or a fixture cannot be loaded.
    pub async fn execute(&self, scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
        Self::validate(&scenario.request)?;

        debug!(
            scenario = %scenario.name,
            method = %scenario.request.method,
            url = %scenario.request.url,
            "sending request"
        );
        let response = self.client.execute(&scenario.request).await?;
        debug!(status = response.status, elapsed = %response.duration_display(), "response received");

        let mut loaded = FixtureSet::new();
        for path in scenario.suite.fixtures() {
            let fixture = self.fixtures.load(path).await?;
            loaded.insert(path, fixture);
        }

        let results = self.verifier.verify(&scenario.suite, &response, &loaded);
        let report = ScenarioReport {
            scenario: scenario.name.clone(),
            status: response.status,
            status_line: response.status_line.clone(),
            results,
        };

        if report.passed() {
            info!(scenario = %scenario.name, "scenario passed");
        } else {
            warn!(
                scenario = %scenario.name,
                failed = report.results.failed,
                total = report.results.total,
                "scenario failed"
            );
        }

        Ok(report)
    }

    fn validate(request: &RequestSpec) -> Result<(), ScenarioError> {
        if request.url.trim().is_empty() {
            return Err(ScenarioError::EmptyUrl);
        }

        match request.parsed_url() {
            Ok(_) => Ok(()),
            Err(DomainError::InvalidUrl(message)) => Err(ScenarioError::InvalidUrl(message)),
            Err(other) => Err(ScenarioError::InvalidUrl(other.to_string())),
        }
    }
}
