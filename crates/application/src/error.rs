//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// A payload did not conform to its schema
///
/// Carries one message per violation so callers can report all of them at
/// once instead of only the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", .violations.join("; "))]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    /// Create a validation error from a list of violations
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }

    /// Create a validation error with a single violation
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            violations: vec![message.into()],
        }
    }

    /// The individual violation messages
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Payload failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration error (including schemas that cannot be compiled)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Policy document could not be produced
    #[error("Policy error: {0}")]
    Policy(String),

    /// Serialization of an outgoing document failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApplicationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use domain::HttpVerb;

    use super::*;

    #[test]
    fn validation_error_joins_violations() {
        let err = ValidationError::new(vec![
            "\"message\" is a required property".to_string(),
            "42 is not of type \"string\"".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: \"message\" is a required property; 42 is not of type \"string\""
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn single_violation() {
        let err = ValidationError::single("bad");
        assert_eq!(err.violations(), ["bad".to_string()]);
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::DuplicateEndpoint {
            verb: HttpVerb::Get,
            path: "/a".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Endpoint GET /a is already registered");
    }

    #[test]
    fn validation_error_converts() {
        let err: ApplicationError = ValidationError::single("bad").into();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[test]
    fn serde_error_converts_to_serialization() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ApplicationError = source.into();
        assert!(matches!(err, ApplicationError::Serialization(_)));
    }

    #[test]
    fn configuration_error_message() {
        let err = ApplicationError::Configuration("schema does not compile".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: schema does not compile"
        );
    }
}
