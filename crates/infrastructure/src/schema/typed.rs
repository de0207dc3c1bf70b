//! Schemas derived from Rust types

use std::{fmt, marker::PhantomData};

use application::{ApplicationError, Schema, SchemaDescriptor, ValidationError};
use jsonschema::Validator;
use schemars::{JsonSchema, generate::SchemaSettings};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::{check, compile, root_description};

/// Generate an inline draft 2020-12 schema for `T`
///
/// Subschemas are inlined so the fragment stays self-contained once it is
/// embedded in the specification document, where `$defs` references would
/// no longer resolve. Recursive types cannot be inlined and are rejected.
pub(crate) fn generate_schema<T: JsonSchema>() -> Result<Value, ApplicationError> {
    let generator = SchemaSettings::draft2020_12()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let mut schema = serde_json::to_value(generator.into_root_schema_for::<T>())?;
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
    }
    if let Some(reference) = find_reference(&schema) {
        return Err(ApplicationError::Configuration(format!(
            "Schema for {} is not self-contained: it refers to {reference}",
            std::any::type_name::<T>()
        )));
    }
    Ok(schema)
}

/// First `$ref` anywhere in a schema document
fn find_reference(schema: &Value) -> Option<&str> {
    match schema {
        Value::Object(map) => map
            .get("$ref")
            .and_then(Value::as_str)
            .or_else(|| map.values().find_map(find_reference)),
        Value::Array(items) => items.iter().find_map(find_reference),
        _ => None,
    }
}

/// Schema for a `serde` type, generated with `schemars`
///
/// Payloads are validated against the generated schema before they are
/// deserialized, so handlers only ever see values that satisfy it. The
/// description defaults to the type's doc comment.
pub struct TypedSchema<T> {
    schema: Value,
    validator: Validator,
    description: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("type", &std::any::type_name::<T>())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T> TypedSchema<T>
where
    T: JsonSchema + Serialize + DeserializeOwned + Send + 'static,
{
    /// Generate and compile the schema for `T`
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the generated schema
    /// cannot be compiled.
    pub fn new() -> Result<Self, ApplicationError> {
        let schema = generate_schema::<T>()?;
        let validator = compile(&schema)?;
        let description = root_description(&schema);
        Ok(Self {
            schema,
            validator,
            description,
            _marker: PhantomData,
        })
    }

    /// Override the description shown in the document
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl<T> SchemaDescriptor for TypedSchema<T>
where
    T: Send + 'static,
{
    fn description(&self) -> Option<String> {
        self.description.clone()
    }

    fn json_schema(&self) -> Value {
        self.schema.clone()
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    type Output = T;

    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        check(&self.validator, value)
    }

    fn parse(&self, value: Value) -> Result<T, ValidationError> {
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|e| ValidationError::single(e.to_string()))
    }

    fn render(&self, output: T) -> Result<Value, ValidationError> {
        let value =
            serde_json::to_value(output).map_err(|e| ValidationError::single(e.to_string()))?;
        self.validate(&value)?;
        Ok(value)
    }
}
