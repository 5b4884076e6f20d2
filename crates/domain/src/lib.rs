//! apiprobe domain - core contract types
//!
//! This crate defines the domain model for the contract harness:
//! requests, responses, fixtures, assertions and scenarios.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod fixture;
pub mod request;
pub mod response;
pub mod scenario;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use fixture::{FixtureFile, FixtureSet};
pub use request::{Endpoint, Header, Headers, HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use scenario::{Scenario, ScenarioReport};
pub use testing::{
    Assertion, AssertionFailure, AssertionResult, StatusExpectation, TestResults, TestSuite,
    WHOLE_BODY,
};
