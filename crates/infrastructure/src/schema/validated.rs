//! Typed schemas with `validator` rules on top

use std::fmt;

use application::{ApplicationError, Schema, SchemaDescriptor, ValidationError};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use super::TypedSchema;

/// A [`TypedSchema`] whose values must also pass their `validator` rules
///
/// JSON Schema covers structure; `#[validate(...)]` attributes cover the
/// rules it cannot express (or that the generated schema does not carry).
pub struct ValidatedSchema<T> {
    inner: TypedSchema<T>,
}

impl<T> fmt::Debug for ValidatedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedSchema")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T> ValidatedSchema<T>
where
    T: JsonSchema + Serialize + DeserializeOwned + Validate + Send + 'static,
{
    /// Generate and compile the schema for `T`
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the generated schema
    /// cannot be compiled.
    pub fn new() -> Result<Self, ApplicationError> {
        Ok(Self {
            inner: TypedSchema::new()?,
        })
    }

    /// Override the description shown in the document
    #[must_use]
    pub fn describe(self, description: impl Into<String>) -> Self {
        Self {
            inner: self.inner.describe(description),
        }
    }
}

/// Flatten `validator` errors into `field: message` lines
fn violations(errors: &ValidationErrors) -> ValidationError {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string)
                )
            })
        })
        .collect();
    // field_errors is a HashMap
    lines.sort();
    ValidationError::new(lines)
}

impl<T> SchemaDescriptor for ValidatedSchema<T>
where
    T: Send + 'static,
{
    fn description(&self) -> Option<String> {
        self.inner.description()
    }

    fn json_schema(&self) -> Value {
        self.inner.json_schema()
    }
}

impl<T> Schema for ValidatedSchema<T>
where
    T: Serialize + DeserializeOwned + Validate + Send + 'static,
{
    type Output = T;

    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.inner.validate(value)?;
        let typed: T = serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::single(e.to_string()))?;
        typed.validate().map_err(|e| violations(&e))
    }

    fn parse(&self, value: Value) -> Result<T, ValidationError> {
        let typed = self.inner.parse(value)?;
        typed.validate().map_err(|e| violations(&e))?;
        Ok(typed)
    }

    fn render(&self, output: T) -> Result<Value, ValidationError> {
        output.validate().map_err(|e| violations(&e))?;
        self.inner.render(output)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    fn not_blank(text: &str) -> Result<(), validator::ValidationError> {
        if text.trim().is_empty() {
            return Err(validator::ValidationError::new("blank")
                .with_message(Cow::Borrowed("must not be blank")));
        }
        Ok(())
    }

    fn lowercase(text: &str) -> Result<(), validator::ValidationError> {
        if text.chars().any(char::is_uppercase) {
            return Err(validator::ValidationError::new("lowercase"));
        }
        Ok(())
    }

    /// A note to store
    #[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
    struct Note {
        #[validate(custom(function = "not_blank"))]
        text: String,
        #[validate(custom(function = "lowercase"))]
        tag: String,
    }

    #[test]
    fn accepts_values_passing_both_checks() {
        let schema = ValidatedSchema::<Note>::new().unwrap();
        let note = schema
            .parse(json!({"text": "buy milk", "tag": "errand"}))
            .unwrap();
        assert_eq!(note.text, "buy milk");
        assert!(schema.validate(&json!({"text": "x", "tag": "y"})).is_ok());
    }

    #[test]
    fn reports_validator_rules_as_field_messages() {
        let schema = ValidatedSchema::<Note>::new().unwrap();
        let err = schema
            .parse(json!({"text": "   ", "tag": "URGENT"}))
            .unwrap_err();

        assert_eq!(
            err.violations(),
            [
                "tag: lowercase".to_string(),
                "text: must not be blank".to_string(),
            ]
        );
    }

    #[test]
    fn validate_applies_rules_to_raw_json() {
        let schema = ValidatedSchema::<Note>::new().unwrap();
        let err = schema
            .validate(&json!({"text": "", "tag": "a"}))
            .unwrap_err();
        assert_eq!(err.violations(), ["text: must not be blank".to_string()]);
    }

    #[test]
    fn structural_errors_come_first() {
        let schema = ValidatedSchema::<Note>::new().unwrap();
        let err = schema.parse(json!({"text": "ok"})).unwrap_err();
        assert!(err.violations()[0].contains("tag"));
    }

    #[test]
    fn render_checks_rules_before_serializing() {
        let schema = ValidatedSchema::<Note>::new().unwrap();
        let result = schema.render(Note {
            text: String::new(),
            tag: "a".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn description_is_forwarded() {
        let schema = ValidatedSchema::<Note>::new()
            .unwrap()
            .describe("Note payload");
        assert_eq!(schema.description().as_deref(), Some("Note payload"));
        assert_eq!(schema.json_schema()["type"], "object");
    }
}
