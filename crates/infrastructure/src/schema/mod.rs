//! Schema adapters
//!
//! Implementations of the application's [`Schema`](application::Schema)
//! port. Typed schemas derive their JSON Schema from Rust types with
//! `schemars` and validate payloads with `jsonschema`; raw schemas wrap a
//! hand-written JSON Schema document.

mod json_value;
mod typed;
mod validated;

use application::{ApplicationError, ValidationError};
use jsonschema::Validator;
use serde_json::Value;

pub use json_value::JsonValueSchema;
pub use typed::TypedSchema;
pub use validated::ValidatedSchema;

/// Compile a JSON Schema document into a reusable validator
fn compile(schema: &Value) -> Result<Validator, ApplicationError> {
    jsonschema::validator_for(schema)
        .map_err(|e| ApplicationError::Configuration(format!("Invalid JSON Schema: {e}")))
}

/// Run a validator and collect every violation
fn check(validator: &Validator, value: &Value) -> Result<(), ValidationError> {
    let violations: Vec<String> = validator
        .iter_errors(value)
        .map(|error| error.to_string())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

/// Root-level `description` of a schema document
fn root_description(schema: &Value) -> Option<String> {
    schema
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn compile_rejects_malformed_schema() {
        let err = compile(&json!({"type": 42})).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn check_collects_all_violations() {
        let validator = compile(&json!({
            "type": "object",
            "properties": {
                "a": {"type": "string"},
                "b": {"type": "integer"}
            },
            "required": ["a", "b"]
        }))
        .unwrap();

        assert!(check(&validator, &json!({"a": "x", "b": 1})).is_ok());

        let err = check(&validator, &json!({"a": 1})).unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn root_description_reads_only_strings() {
        assert_eq!(
            root_description(&json!({"description": "A thing"})).as_deref(),
            Some("A thing")
        );
        assert_eq!(root_description(&json!({"description": 1})), None);
        assert_eq!(root_description(&json!({})), None);
    }
}
