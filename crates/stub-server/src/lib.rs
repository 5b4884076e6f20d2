//! apiprobe stub - local JSONPlaceholder-compatible service
//!
//! Serves posts and comments from a json-server style seed document so the
//! contract scenarios can run without network access. Writes are echoed
//! back but never stored, the same way the public service behaves.

mod db;
mod error;
mod handlers;
mod server;

pub use db::{Db, Record};
pub use error::{StubError, StubResult};
pub use handlers::{JSON_CONTENT_TYPE, router};
pub use server::StubServer;
