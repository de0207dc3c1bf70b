//! Endpoint definitions
//!
//! Callers register endpoints through one of three typed shapes, each
//! carrying exactly the schemas its registration operation needs. The
//! registry turns every shape into the canonical [`EndpointDefinition`],
//! which is what dispatch bookkeeping and document synthesis read.

use std::{fmt, sync::Arc};

use domain::HttpVerb;

use crate::ports::SchemaDescriptor;

/// Request body description used when the schema carries none
pub const DEFAULT_REQUEST_DESC: &str = "Request body";

/// Response body description used when the schema carries none
pub const DEFAULT_RESPONSE_DESC: &str = "Response body";

/// Input-only endpoint: a request schema, no response schema
#[derive(Debug, Clone)]
pub struct InEndpointDefinition<Req> {
    pub verb: HttpVerb,
    pub path: String,
    pub operation_id: String,
    pub desc: String,
    pub request_schema: Req,
}

/// Output-only endpoint: a response schema, no request schema
#[derive(Debug, Clone)]
pub struct OutEndpointDefinition<Res> {
    pub verb: HttpVerb,
    pub path: String,
    pub operation_id: String,
    pub desc: String,
    pub response_schema: Res,
}

/// Input/output endpoint: both a request and a response schema
#[derive(Debug, Clone)]
pub struct InOutEndpointDefinition<Req, Res> {
    pub verb: HttpVerb,
    pub path: String,
    pub operation_id: String,
    pub desc: String,
    pub request_schema: Req,
    pub response_schema: Res,
}

/// Canonical description of one registered route
///
/// Schema presence is fixed by the constructor used, so a record always
/// matches one of the three registration shapes.
#[derive(Clone)]
pub struct EndpointDefinition {
    verb: HttpVerb,
    path: String,
    operation_id: String,
    desc: String,
    request_schema: Option<Arc<dyn SchemaDescriptor>>,
    request_desc: Option<String>,
    response_schema: Option<Arc<dyn SchemaDescriptor>>,
    response_desc: Option<String>,
}

fn request_desc_of(schema: &dyn SchemaDescriptor) -> String {
    schema
        .description()
        .unwrap_or_else(|| DEFAULT_REQUEST_DESC.to_string())
}

fn response_desc_of(schema: &dyn SchemaDescriptor) -> String {
    schema
        .description()
        .unwrap_or_else(|| DEFAULT_RESPONSE_DESC.to_string())
}

impl EndpointDefinition {
    /// Record for an endpoint that accepts a body and answers with a status code
    pub fn request_only(
        verb: HttpVerb,
        path: impl Into<String>,
        operation_id: impl Into<String>,
        desc: impl Into<String>,
        request_schema: Arc<dyn SchemaDescriptor>,
    ) -> Self {
        Self {
            verb,
            path: path.into(),
            operation_id: operation_id.into(),
            desc: desc.into(),
            request_desc: Some(request_desc_of(request_schema.as_ref())),
            request_schema: Some(request_schema),
            response_schema: None,
            response_desc: None,
        }
    }

    /// Record for an endpoint that ignores its input and answers with JSON
    pub fn response_only(
        verb: HttpVerb,
        path: impl Into<String>,
        operation_id: impl Into<String>,
        desc: impl Into<String>,
        response_schema: Arc<dyn SchemaDescriptor>,
    ) -> Self {
        Self {
            verb,
            path: path.into(),
            operation_id: operation_id.into(),
            desc: desc.into(),
            request_schema: None,
            request_desc: None,
            response_desc: Some(response_desc_of(response_schema.as_ref())),
            response_schema: Some(response_schema),
        }
    }

    /// Record for an endpoint that accepts a JSON body and answers with JSON
    pub fn request_response(
        verb: HttpVerb,
        path: impl Into<String>,
        operation_id: impl Into<String>,
        desc: impl Into<String>,
        request_schema: Arc<dyn SchemaDescriptor>,
        response_schema: Arc<dyn SchemaDescriptor>,
    ) -> Self {
        Self {
            verb,
            path: path.into(),
            operation_id: operation_id.into(),
            desc: desc.into(),
            request_desc: Some(request_desc_of(request_schema.as_ref())),
            request_schema: Some(request_schema),
            response_desc: Some(response_desc_of(response_schema.as_ref())),
            response_schema: Some(response_schema),
        }
    }

    pub const fn verb(&self) -> HttpVerb {
        self.verb
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn request_schema(&self) -> Option<&dyn SchemaDescriptor> {
        self.request_schema.as_deref()
    }

    pub fn request_desc(&self) -> Option<&str> {
        self.request_desc.as_deref()
    }

    pub fn response_schema(&self) -> Option<&dyn SchemaDescriptor> {
        self.response_schema.as_deref()
    }

    pub fn response_desc(&self) -> Option<&str> {
        self.response_desc.as_deref()
    }
}

impl fmt::Debug for EndpointDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointDefinition")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("operation_id", &self.operation_id)
            .field("desc", &self.desc)
            .field("has_request_schema", &self.request_schema.is_some())
            .field("request_desc", &self.request_desc)
            .field("has_response_schema", &self.response_schema.is_some())
            .field("response_desc", &self.response_desc)
            .finish()
    }
}

impl<Req> InEndpointDefinition<Req>
where
    Req: SchemaDescriptor + 'static,
{
    /// Split into the canonical record and the shared request schema
    pub fn into_canonical(self) -> (EndpointDefinition, Arc<Req>) {
        let request_schema = Arc::new(self.request_schema);
        let endpoint = EndpointDefinition::request_only(
            self.verb,
            self.path,
            self.operation_id,
            self.desc,
            Arc::clone(&request_schema) as Arc<dyn SchemaDescriptor>,
        );
        (endpoint, request_schema)
    }
}

impl<Res> OutEndpointDefinition<Res>
where
    Res: SchemaDescriptor + 'static,
{
    /// Split into the canonical record and the shared response schema
    pub fn into_canonical(self) -> (EndpointDefinition, Arc<Res>) {
        let response_schema = Arc::new(self.response_schema);
        let endpoint = EndpointDefinition::response_only(
            self.verb,
            self.path,
            self.operation_id,
            self.desc,
            Arc::clone(&response_schema) as Arc<dyn SchemaDescriptor>,
        );
        (endpoint, response_schema)
    }
}

impl<Req, Res> InOutEndpointDefinition<Req, Res>
where
    Req: SchemaDescriptor + 'static,
    Res: SchemaDescriptor + 'static,
{
    /// Split into the canonical record and both shared schemas
    pub fn into_canonical(self) -> (EndpointDefinition, Arc<Req>, Arc<Res>) {
        let request_schema = Arc::new(self.request_schema);
        let response_schema = Arc::new(self.response_schema);
        let endpoint = EndpointDefinition::request_response(
            self.verb,
            self.path,
            self.operation_id,
            self.desc,
            Arc::clone(&request_schema) as Arc<dyn SchemaDescriptor>,
            Arc::clone(&response_schema) as Arc<dyn SchemaDescriptor>,
        );
        (endpoint, request_schema, response_schema)
    }
}
