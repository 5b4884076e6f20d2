//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod fixture_loader;
mod http_client;
mod response_verifier;

pub use fixture_loader::{FixtureError, FixtureLoader};
pub use http_client::{HttpClient, HttpClientError};
pub use response_verifier::ResponseVerifier;
