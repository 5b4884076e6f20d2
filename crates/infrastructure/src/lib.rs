//! apiprobe infrastructure - adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod testing;

pub use adapters::{DEFAULT_TIMEOUT_MS, ReqwestHttpClient};
pub use persistence::FsFixtureLoader;
pub use testing::{JsonPathError, TestRunner, normalize_whitespace, pretty_body};
