//! API metadata
//!
//! Describes the API to the consuming client: where it lives, what it is
//! called, what it is for, and optionally where its policy comes from.

use std::{fmt, sync::Arc};

use crate::ports::PolicyProvider;

/// Top-level description of an API
///
/// Immutable once constructed; the registry owns it for its whole lifetime.
#[derive(Clone)]
pub struct ApiInfo {
    url: String,
    title: String,
    description: String,
    version: String,
    policy: Option<Arc<dyn PolicyProvider>>,
}

impl ApiInfo {
    /// Create API metadata without a policy
    ///
    /// # Arguments
    /// * `url` - Base URL the API is reachable at
    /// * `title` - Name of the API, tells the client what it is for
    /// * `description` - Short summary of the API's purpose
    /// * `version` - Version string of the API
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            version: version.into(),
            policy: None,
        }
    }

    /// Attach a policy provider, served at the policy route
    #[must_use]
    pub fn with_policy(mut self, provider: Arc<dyn PolicyProvider>) -> Self {
        self.policy = Some(provider);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The policy provider, if one was configured
    pub fn policy(&self) -> Option<&Arc<dyn PolicyProvider>> {
        self.policy.as_ref()
    }

    /// Whether a policy route will be served
    pub fn has_policy(&self) -> bool {
        self.policy.is_some()
    }
}

impl fmt::Debug for ApiInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiInfo")
            .field("url", &self.url)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("version", &self.version)
            .field("has_policy", &self.policy.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StaticPolicy;

    fn info() -> ApiInfo {
        ApiInfo::new(
            "https://theapi.example.com",
            "The API",
            "The API for a GPT to use",
            "1.0.0",
        )
    }

    #[test]
    fn accessors_return_constructor_values() {
        let info = info();
        assert_eq!(info.url(), "https://theapi.example.com");
        assert_eq!(info.title(), "The API");
        assert_eq!(info.description(), "The API for a GPT to use");
        assert_eq!(info.version(), "1.0.0");
        assert!(!info.has_policy());
    }

    #[test]
    fn with_policy_attaches_provider() {
        let info = info().with_policy(Arc::new(StaticPolicy::new("policy")));
        assert!(info.has_policy());
        assert!(info.policy().is_some());
    }

    #[test]
    fn debug_does_not_require_provider_debug() {
        let debug = format!("{:?}", info().with_policy(Arc::new(StaticPolicy::new("p"))));
        assert!(debug.contains("has_policy: true"));
        assert!(debug.contains("The API"));
    }
}
