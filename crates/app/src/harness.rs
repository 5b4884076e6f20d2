//! Wires the adapters into the scenario use case and runs the catalogue.

use std::sync::Arc;

use apiprobe_application::{ApplicationResult, RunScenario, ScenarioError};
use apiprobe_domain::{Scenario, ScenarioReport};
use apiprobe_infrastructure::{FsFixtureLoader, ReqwestHttpClient, TestRunner};
use tracing::warn;

use crate::scenarios;
use crate::settings::Settings;

/// The scenario use case over the production adapters.
pub type ContractRunner = RunScenario<ReqwestHttpClient, FsFixtureLoader, TestRunner>;

/// Result of one scenario: a report, or the error that stopped it.
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Report when the exchange completed.
    pub result: Result<ScenarioReport, ScenarioError>,
}

impl ScenarioOutcome {
    /// True when the exchange completed and every assertion passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_ok_and(ScenarioReport::passed)
    }
}

/// Runs contract scenarios against one service.
pub struct Harness {
    runner: ContractRunner,
    base_url: String,
}

impl Harness {
    /// Builds a harness honouring proxy settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(settings: &Settings) -> ApplicationResult<Self> {
        let client = ReqwestHttpClient::new(settings.timeout_ms)?;
        Ok(Self::with_client(settings, client))
    }

    /// Builds a harness that connects directly, for loopback services.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn direct(settings: &Settings) -> ApplicationResult<Self> {
        let client = ReqwestHttpClient::without_proxy(settings.timeout_ms)?;
        Ok(Self::with_client(settings, client))
    }

    fn with_client(settings: &Settings, client: ReqwestHttpClient) -> Self {
        let runner = RunScenario::new(
            Arc::new(client),
            Arc::new(FsFixtureLoader::new(&settings.fixtures_dir)),
            Arc::new(TestRunner::new().with_stop_on_failure(settings.stop_on_failure)),
        );
        Self {
            runner,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL scenarios are built against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The full contract for this harness' service.
    #[must_use]
    pub fn scenarios(&self) -> Vec<Scenario> {
        scenarios::catalogue(&self.base_url)
    }

    /// Runs one scenario.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        let result = self.runner.execute(scenario).await;
        if let Err(e) = &result {
            warn!(scenario = %scenario.name, error = %e, "scenario aborted");
        }
        ScenarioOutcome {
            name: scenario.name.clone(),
            result,
        }
    }

    /// Runs scenarios one after another.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(self.run_scenario(scenario).await);
        }
        outcomes
    }
}
