//! Specification document synthesis
//!
//! Builds the OpenAPI 3.1 description a GPT action reads to discover the
//! API. The document is derived from the endpoint list on every call and
//! never cached. Paths keep first-seen order and verbs keep registration
//! order within a path, so the output is stable for a given registry.

use domain::HttpVerb;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::{
    endpoint::{DEFAULT_REQUEST_DESC, EndpointDefinition},
    error::ApplicationError,
    ports::SchemaDescriptor,
};

/// OpenAPI version the document declares
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Response description used when an endpoint has no response schema
pub const FALLBACK_RESPONSE_DESC: &str = "Success";

/// Media type every request and response body is declared with
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// The full specification document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecDocument {
    pub openapi: &'static str,
    pub info: SpecInfo,
    pub servers: Vec<SpecServer>,
    pub paths: SpecPaths,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecInfo {
    pub title: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecServer {
    pub url: String,
}

/// Path items keyed by path pattern, in first-seen order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecPaths(Vec<(String, PathItem)>);

/// Operations keyed by verb, in registration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem(Vec<(HttpVerb, Operation)>);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub description: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: Responses,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub description: String,
    pub required: bool,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Responses {
    #[serde(rename = "200")]
    pub ok: ResponseObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseObject {
    pub description: String,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    #[serde(rename = "application/json")]
    pub json: MediaType,
}

/// Body schema; `Value::Null` when the endpoint declares none
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Value,
}

impl SpecPaths {
    /// Look up the item for a path pattern
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&PathItem> {
        self.0
            .iter()
            .find_map(|(key, item)| (key == path).then_some(item))
    }

    /// Path patterns in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn item_mut(&mut self, path: &str) -> &mut PathItem {
        let index = match self.0.iter().position(|(key, _)| key == path) {
            Some(index) => index,
            None => {
                self.0.push((path.to_string(), PathItem::default()));
                self.0.len() - 1
            },
        };
        &mut self.0[index].1
    }
}

impl PathItem {
    /// Look up the operation for a verb
    #[must_use]
    pub fn get(&self, verb: HttpVerb) -> Option<&Operation> {
        self.0
            .iter()
            .find_map(|(key, operation)| (*key == verb).then_some(operation))
    }

    /// Verbs in document order
    pub fn verbs(&self) -> impl Iterator<Item = HttpVerb> + '_ {
        self.0.iter().map(|(verb, _)| *verb)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // A later operation for the same verb replaces the earlier one in place
    fn insert(&mut self, verb: HttpVerb, operation: Operation) {
        match self.0.iter_mut().find(|(key, _)| *key == verb) {
            Some(slot) => slot.1 = operation,
            None => self.0.push((verb, operation)),
        }
    }
}

impl Serialize for SpecPaths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, item) in &self.0 {
            map.serialize_entry(path, item)?;
        }
        map.end()
    }
}

impl Serialize for PathItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (verb, operation) in &self.0 {
            map.serialize_entry(verb.as_str(), operation)?;
        }
        map.end()
    }
}

impl SpecDocument {
    /// Render the document as indented JSON text
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Serialization`] if a schema fragment
    /// cannot be serialized.
    pub fn to_pretty_json(&self) -> Result<String, ApplicationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the document as a JSON value
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Serialization`] if a schema fragment
    /// cannot be serialized.
    pub fn to_value(&self) -> Result<Value, ApplicationError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Convert an optional schema into its document fragment
///
/// Absent schemas become `null`.
#[must_use]
pub fn schema_fragment(schema: Option<&dyn SchemaDescriptor>) -> Value {
    schema.map_or(Value::Null, |schema| schema.json_schema())
}

fn operation_for(endpoint: &EndpointDefinition) -> Operation {
    let request_body = endpoint.request_schema().map(|schema| RequestBody {
        description: endpoint
            .request_desc()
            .unwrap_or(DEFAULT_REQUEST_DESC)
            .to_string(),
        required: true,
        content: Content {
            json: MediaType {
                schema: schema.json_schema(),
            },
        },
    });

    Operation {
        description: endpoint.desc().to_string(),
        operation_id: endpoint.operation_id().to_string(),
        request_body,
        responses: Responses {
            ok: ResponseObject {
                description: endpoint
                    .response_desc()
                    .unwrap_or(FALLBACK_RESPONSE_DESC)
                    .to_string(),
                content: Content {
                    json: MediaType {
                        schema: schema_fragment(endpoint.response_schema()),
                    },
                },
            },
        },
    }
}

/// Synthesize the specification document for a set of endpoints
///
/// # Arguments
/// * `url` - Base URL, listed as the single server
/// * `title` - API title
/// * `description` - API description
/// * `version` - API version
/// * `endpoints` - Endpoints in registration order
pub fn build_spec_document<'a>(
    url: &str,
    title: &str,
    description: &str,
    version: &str,
    endpoints: impl IntoIterator<Item = &'a EndpointDefinition>,
) -> SpecDocument {
    let mut paths = SpecPaths::default();
    for endpoint in endpoints {
        paths
            .item_mut(endpoint.path())
            .insert(endpoint.verb(), operation_for(endpoint));
    }

    SpecDocument {
        openapi: OPENAPI_VERSION,
        info: SpecInfo {
            title: title.to_string(),
            description: description.to_string(),
            version: version.to_string(),
        },
        servers: vec![SpecServer {
            url: url.to_string(),
        }],
        paths,
    }
}
