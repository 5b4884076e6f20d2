//! HTTP Request domain types

mod body;
mod endpoint;
mod header;
mod method;
mod spec;

pub use body::RequestBody;
pub use endpoint::Endpoint;
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use spec::RequestSpec;
