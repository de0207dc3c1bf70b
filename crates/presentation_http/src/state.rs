//! State shared by the framework's own handlers

use application::{ApiInfo, EndpointDefinition, SpecDocument, build_spec_document};

/// Frozen API description behind the specification route
///
/// Built once when the router is assembled and shared read-only by every
/// request; the document itself is synthesized per request.
#[derive(Debug)]
pub struct ApiDescription {
    info: ApiInfo,
    endpoints: Vec<EndpointDefinition>,
}

impl ApiDescription {
    pub fn new(info: ApiInfo, endpoints: Vec<EndpointDefinition>) -> Self {
        Self { info, endpoints }
    }

    pub fn info(&self) -> &ApiInfo {
        &self.info
    }

    pub fn endpoints(&self) -> &[EndpointDefinition] {
        &self.endpoints
    }

    /// Synthesize the specification document
    pub fn document(&self) -> SpecDocument {
        build_spec_document(
            self.info.url(),
            self.info.title(),
            self.info.description(),
            self.info.version(),
            &self.endpoints,
        )
    }
}
