//! apiprobe - contract checks for the JSONPlaceholder posts API
//!
//! Builds the scenario catalogue, loads settings and runs every scenario
//! through the application use case with the infrastructure adapters.

pub mod harness;
pub mod report;
pub mod scenarios;
pub mod settings;

pub use harness::{ContractRunner, Harness, ScenarioOutcome};
pub use report::{Summary, render};
pub use settings::{Settings, SettingsError};
