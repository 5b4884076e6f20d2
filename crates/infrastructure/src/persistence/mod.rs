//! File-backed adapters.

mod fixture_loader;

pub use fixture_loader::FsFixtureLoader;
