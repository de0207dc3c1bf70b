//! Domain-level errors

use thiserror::Error;

use crate::value_objects::HttpVerb;

/// Errors raised while describing endpoints
///
/// All of these are setup-time programming errors: they surface while the
/// API is being assembled, never while a request is being served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// HTTP verb outside the supported set
    #[error("HTTP verb {0} not supported")]
    UnsupportedVerb(String),

    /// Malformed URL path pattern
    #[error("Invalid path pattern '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The same verb and path were registered twice
    #[error("Endpoint {verb} {path} is already registered")]
    DuplicateEndpoint { verb: HttpVerb, path: String },

    /// Two path patterns only differ in their parameter names
    #[error("Path '{path}' conflicts with already registered path '{existing}'")]
    ConflictingPath { path: String, existing: String },

    /// The route is served by the framework itself
    #[error("Route {verb} {path} is reserved")]
    ReservedRoute { verb: HttpVerb, path: String },
}

impl DomainError {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
