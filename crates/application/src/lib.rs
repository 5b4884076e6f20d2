//! apiprobe application - use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, fixture loading, response verification)
//! - The scenario use case
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{FixtureError, FixtureLoader, HttpClient, HttpClientError, ResponseVerifier};
pub use use_cases::{RunScenario, ScenarioError};
