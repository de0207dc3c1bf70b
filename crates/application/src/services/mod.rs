//! Application services - Registry bookkeeping, document synthesis and policy serving

mod endpoint_registry;
mod policy_service;
mod spec_document;

pub use endpoint_registry::{EndpointRegistry, POLICY_PATH, SCHEMA_PATH};
pub use policy_service::{PolicyDocument, PolicyFormat, PolicyService};
pub use spec_document::{
    Content, FALLBACK_RESPONSE_DESC, JSON_MEDIA_TYPE, MediaType, OPENAPI_VERSION, Operation,
    PathItem, RequestBody, ResponseObject, Responses, SpecDocument, SpecInfo, SpecPaths,
    SpecServer, build_spec_document, schema_fragment,
};
