//! Schema ports
//!
//! A schema validates JSON payloads, optionally carries a human-readable
//! description, and converts itself into a JSON Schema fragment for the
//! generated document. The split into two traits keeps the document side
//! object safe while the validating side stays strongly typed.

#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ValidationError;

/// Read-only view of a schema used when describing an endpoint
///
/// Object safe, so endpoint records can hold `Arc<dyn SchemaDescriptor>`
/// regardless of which concrete schema type was registered.
#[cfg_attr(test, automock)]
pub trait SchemaDescriptor: Send + Sync {
    /// Human-readable description attached to the schema, if any
    fn description(&self) -> Option<String>;

    /// JSON Schema fragment embedded in the specification document
    fn json_schema(&self) -> Value;
}

/// A schema that validates payloads and maps them to a typed value
pub trait Schema: SchemaDescriptor + 'static {
    /// The value handlers work with once a payload has been accepted
    type Output: Send + 'static;

    /// Check a raw JSON value against the schema
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;

    /// Validate an inbound payload and convert it into the typed value
    fn parse(&self, value: Value) -> Result<Self::Output, ValidationError>;

    /// Convert an outbound typed value to JSON and validate the result
    fn render(&self, output: Self::Output) -> Result<Value, ValidationError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mock_descriptor_can_stand_in_for_a_schema() {
        let mut descriptor = MockSchemaDescriptor::new();
        descriptor
            .expect_description()
            .returning(|| Some("A message".to_string()));
        descriptor
            .expect_json_schema()
            .returning(|| json!({"type": "string"}));

        let dynamic: &dyn SchemaDescriptor = &descriptor;
        assert_eq!(dynamic.description().as_deref(), Some("A message"));
        assert_eq!(dynamic.json_schema(), json!({"type": "string"}));
    }
}
