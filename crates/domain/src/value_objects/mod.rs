//! Value Objects - Immutable, identity-less domain primitives

mod credential;
mod endpoint_path;
mod http_verb;

pub use credential::{BEARER_PREFIX, Credential};
pub use endpoint_path::EndpointPath;
pub use http_verb::HttpVerb;
