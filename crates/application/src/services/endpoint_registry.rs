//! Endpoint registry
//!
//! Ordered bookkeeping of every registered endpoint. Registration order is
//! preserved because the generated document lists paths in first-seen
//! order. All checks run before anything is bound on the HTTP router, so a
//! rejected endpoint leaves no trace.

use std::collections::HashSet;

use domain::{DomainError, EndpointPath, HttpVerb};
use tracing::{debug, warn};

use crate::{api_info::ApiInfo, endpoint::EndpointDefinition};

/// Route serving the generated specification document
pub const SCHEMA_PATH: &str = "/gpt/schema";

/// Route serving the policy document, when one is configured
pub const POLICY_PATH: &str = "/privacypolicy";

/// Ordered collection of endpoint definitions
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<EndpointDefinition>,
    reserved: Vec<(HttpVerb, String)>,
}

impl EndpointRegistry {
    /// Create an empty registry with no reserved routes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry reserving the routes the framework serves for `info`
    #[must_use]
    pub fn for_api(info: &ApiInfo) -> Self {
        let mut registry = Self::new();
        registry.reserve(HttpVerb::Get, SCHEMA_PATH);
        if info.has_policy() {
            registry.reserve(HttpVerb::Get, POLICY_PATH);
        }
        registry
    }

    /// Mark a route as unavailable for registration
    pub fn reserve(&mut self, verb: HttpVerb, path: impl Into<String>) {
        self.reserved.push((verb, path.into()));
    }

    /// Append an endpoint after checking it against everything registered so far
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] for malformed patterns,
    /// [`DomainError::ReservedRoute`] for framework routes,
    /// [`DomainError::DuplicateEndpoint`] when the verb and path are taken,
    /// and [`DomainError::ConflictingPath`] when another pattern puts a
    /// different placeholder at the same position.
    pub fn register(&mut self, endpoint: EndpointDefinition) -> Result<(), DomainError> {
        let path = EndpointPath::parse(endpoint.path())?;
        let verb = endpoint.verb();

        if self
            .reserved
            .iter()
            .any(|(reserved_verb, reserved_path)| {
                *reserved_verb == verb && reserved_path == path.as_str()
            })
        {
            return Err(DomainError::ReservedRoute {
                verb,
                path: path.into(),
            });
        }

        for existing in &self.endpoints {
            if existing.path() == path.as_str() {
                if existing.verb() == verb {
                    return Err(DomainError::DuplicateEndpoint {
                        verb,
                        path: path.into(),
                    });
                }
                continue;
            }
            // All verbs share one route table, so conflicts are checked across verbs
            let existing_path = EndpointPath::parse(existing.path())?;
            if path.conflicts_with(&existing_path) {
                return Err(DomainError::ConflictingPath {
                    path: path.into(),
                    existing: existing.path().to_string(),
                });
            }
        }

        if self
            .endpoints
            .iter()
            .any(|existing| existing.operation_id() == endpoint.operation_id())
        {
            warn!(
                operation_id = %endpoint.operation_id(),
                path = %endpoint.path(),
                "Operation id is already in use; clients may not be able to tell the endpoints apart"
            );
        }

        debug!(
            verb = %verb,
            path = %endpoint.path(),
            operation_id = %endpoint.operation_id(),
            "Registered endpoint"
        );
        self.endpoints.push(endpoint);
        Ok(())
    }

    /// Registered endpoints in registration order
    pub fn iter(&self) -> impl Iterator<Item = &EndpointDefinition> {
        self.endpoints.iter()
    }

    /// Registered endpoints as a slice
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointDefinition] {
        &self.endpoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Distinct operation ids, useful for diagnostics
    #[must_use]
    pub fn operation_ids(&self) -> HashSet<&str> {
        self.endpoints
            .iter()
            .map(EndpointDefinition::operation_id)
            .collect()
    }

    /// Consume the registry, keeping the endpoints in order
    #[must_use]
    pub fn into_endpoints(self) -> Vec<EndpointDefinition> {
        self.endpoints
    }
}
