//! Response testing infrastructure.
//!
//! This module provides the assertion engine that checks HTTP responses,
//! plus the field path resolver and the whitespace normalization it uses.

pub mod json_path;
mod normalize;
mod runner;

pub use json_path::{JsonPathError, PathStep};
pub use normalize::{normalize_whitespace, pretty_body};
pub use runner::TestRunner;
