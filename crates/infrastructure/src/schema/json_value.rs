//! Hand-written JSON Schema documents

use std::fmt;

use application::{ApplicationError, Schema, SchemaDescriptor, ValidationError};
use jsonschema::Validator;
use serde_json::Value;

use super::{check, compile, root_description};

/// Schema given as a JSON Schema document
///
/// Handlers work with the raw [`Value`]; it is only checked against the
/// document, never deserialized.
pub struct JsonValueSchema {
    schema: Value,
    validator: Validator,
    description: Option<String>,
}

impl fmt::Debug for JsonValueSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonValueSchema")
            .field("schema", &self.schema)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl JsonValueSchema {
    /// Compile a schema document
    ///
    /// The description defaults to the document's root `description`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the document is not a
    /// valid JSON Schema.
    pub fn new(schema: Value) -> Result<Self, ApplicationError> {
        let validator = compile(&schema)?;
        let description = root_description(&schema);
        Ok(Self {
            schema,
            validator,
            description,
        })
    }

    /// Override the description shown in the document
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SchemaDescriptor for JsonValueSchema {
    fn description(&self) -> Option<String> {
        self.description.clone()
    }

    fn json_schema(&self) -> Value {
        self.schema.clone()
    }
}

impl Schema for JsonValueSchema {
    type Output = Value;

    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        check(&self.validator, value)
    }

    fn parse(&self, value: Value) -> Result<Value, ValidationError> {
        self.validate(&value)?;
        Ok(value)
    }

    fn render(&self, output: Value) -> Result<Value, ValidationError> {
        self.validate(&output)?;
        Ok(output)
    }
}
