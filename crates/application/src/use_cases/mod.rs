//! Use cases (application services)

mod run_scenario;

pub use run_scenario::{RunScenario, ScenarioError};
