//! Endpoint registry bound to an axum router
//!
//! [`GptApi`] pairs the ordered endpoint bookkeeping from the application
//! layer with the axum routes that serve those endpoints. Each of the three
//! registration operations validates the route, records it, and binds a
//! handler that runs the schema checks around the caller's function.

use std::{future::Future, sync::Arc};

use application::{
    ApiInfo, ApplicationError, EndpointDefinition, EndpointRegistry, InEndpointDefinition,
    InOutEndpointDefinition, OutEndpointDefinition, POLICY_PATH, PolicyService, SCHEMA_PATH,
    Schema, SpecDocument,
};
use axum::{
    Json, Router,
    body::Bytes,
    handler::Handler,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{self, MethodRouter},
};
use domain::{Credential, HttpVerb};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::ApiError,
    extract::{ApiContext, BearerCredential},
    handlers,
    state::ApiDescription,
};

/// A GPT action API under construction
///
/// Register endpoints with [`json_to_nothing`](Self::json_to_nothing),
/// [`nothing_to_json`](Self::nothing_to_json) and
/// [`json_to_json`](Self::json_to_json), then turn the whole thing into a
/// router with [`into_router`](Self::into_router). The router also serves
/// the specification document at `GET /gpt/schema` and, when the API info
/// carries a policy provider, the policy at `GET /privacypolicy`.
pub struct GptApi {
    info: ApiInfo,
    registry: EndpointRegistry,
    router: Router,
}

impl std::fmt::Debug for GptApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GptApi")
            .field("info", &self.info)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Bind a handler to the axum method router matching `verb`
fn on_verb<H, T>(verb: HttpVerb, handler: H) -> MethodRouter
where
    H: Handler<T, ()>,
    T: 'static,
{
    match verb {
        HttpVerb::Get => routing::get(handler),
        HttpVerb::Post => routing::post(handler),
        HttpVerb::Put => routing::put(handler),
        HttpVerb::Delete => routing::delete(handler),
        HttpVerb::Patch => routing::patch(handler),
    }
}

/// Decode and validate a request body
///
/// A missing body is not JSON and is rejected like any other malformed one.
fn parse_body<S: Schema>(schema: &S, body: &Bytes) -> Result<S::Output, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

    schema.parse(value).map_err(|e| {
        debug!(error = %e, "Request body rejected");
        ApiError::RequestValidation(e)
    })
}

/// Validate a handler result and serialize it
fn render_body<S: Schema>(schema: &S, output: S::Output) -> Response {
    match schema.render(output) {
        Ok(value) => Json(value).into_response(),
        Err(e) => ApiError::ResponseValidation(e).into_response(),
    }
}

impl GptApi {
    /// Create an API with no endpoints
    pub fn new(info: ApiInfo) -> Self {
        Self {
            registry: EndpointRegistry::for_api(&info),
            router: Router::new(),
            info,
        }
    }

    pub fn info(&self) -> &ApiInfo {
        &self.info
    }

    /// Registered endpoints in registration order
    pub fn endpoints(&self) -> &[EndpointDefinition] {
        self.registry.endpoints()
    }

    /// Whether an endpoint is registered for the verb and path pattern
    pub fn has_endpoint(&self, verb: HttpVerb, path: &str) -> bool {
        self.registry
            .iter()
            .any(|endpoint| endpoint.verb() == verb && endpoint.path() == path)
    }

    /// The specification document for the endpoints registered so far
    pub fn spec_document(&self) -> SpecDocument {
        application::build_spec_document(
            self.info.url(),
            self.info.title(),
            self.info.description(),
            self.info.version(),
            self.registry.iter(),
        )
    }

    fn bind(&mut self, path: &str, method_router: MethodRouter) {
        let router = std::mem::take(&mut self.router);
        self.router = router.route(path, method_router);
    }

    /// Register an endpoint that takes a JSON body and answers with a status code
    ///
    /// The body is validated before `handler` runs; an invalid body is
    /// answered with `400` and the handler is never invoked. The handler's
    /// status code is sent with an empty body.
    ///
    /// # Errors
    ///
    /// Fails when the path is malformed, reserved, already registered for
    /// this verb, or conflicts with another registered path.
    pub fn json_to_nothing<Req, H, Fut, E>(
        &mut self,
        definition: InEndpointDefinition<Req>,
        handler: H,
    ) -> Result<&mut Self, ApplicationError>
    where
        Req: Schema,
        H: Fn(ApiContext, Req::Output, Option<Credential>) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<StatusCode, E>> + Send + 'static,
        E: IntoResponse + Send + 'static,
    {
        let (endpoint, request_schema) = definition.into_canonical();
        let verb = endpoint.verb();
        let path = endpoint.path().to_string();
        self.registry.register(endpoint)?;

        let method_router = on_verb(
            verb,
            move |context: ApiContext, BearerCredential(credential): BearerCredential, body: Bytes| {
                let handler = handler.clone();
                let request_schema = Arc::clone(&request_schema);
                async move {
                    let input = match parse_body(request_schema.as_ref(), &body) {
                        Ok(input) => input,
                        Err(err) => return err.into_response(),
                    };
                    match handler(context, input, credential).await {
                        Ok(status) => status.into_response(),
                        Err(err) => err.into_response(),
                    }
                }
            },
        );
        self.bind(&path, method_router);
        Ok(self)
    }

    /// Register an endpoint that ignores its input and answers with JSON
    ///
    /// The handler's result is validated before it is sent; an invalid
    /// result is answered with `500` and never reaches the client.
    ///
    /// # Errors
    ///
    /// Fails when the path is malformed, reserved, already registered for
    /// this verb, or conflicts with another registered path.
    pub fn nothing_to_json<Res, H, Fut, E>(
        &mut self,
        definition: OutEndpointDefinition<Res>,
        handler: H,
    ) -> Result<&mut Self, ApplicationError>
    where
        Res: Schema,
        H: Fn(ApiContext, Option<Credential>) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<Res::Output, E>> + Send + 'static,
        E: IntoResponse + Send + 'static,
    {
        let (endpoint, response_schema) = definition.into_canonical();
        let verb = endpoint.verb();
        let path = endpoint.path().to_string();
        self.registry.register(endpoint)?;

        let method_router = on_verb(
            verb,
            move |context: ApiContext, BearerCredential(credential): BearerCredential| {
                let handler = handler.clone();
                let response_schema = Arc::clone(&response_schema);
                async move {
                    match handler(context, credential).await {
                        Ok(output) => render_body(response_schema.as_ref(), output),
                        Err(err) => err.into_response(),
                    }
                }
            },
        );
        self.bind(&path, method_router);
        Ok(self)
    }

    /// Register an endpoint that takes a JSON body and answers with JSON
    ///
    /// Combines the request check of [`json_to_nothing`](Self::json_to_nothing)
    /// with the response check of [`nothing_to_json`](Self::nothing_to_json).
    ///
    /// # Errors
    ///
    /// Fails when the path is malformed, reserved, already registered for
    /// this verb, or conflicts with another registered path.
    pub fn json_to_json<Req, Res, H, Fut, E>(
        &mut self,
        definition: InOutEndpointDefinition<Req, Res>,
        handler: H,
    ) -> Result<&mut Self, ApplicationError>
    where
        Req: Schema,
        Res: Schema,
        H: Fn(ApiContext, Req::Output, Option<Credential>) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<Res::Output, E>> + Send + 'static,
        E: IntoResponse + Send + 'static,
    {
        let (endpoint, request_schema, response_schema) = definition.into_canonical();
        let verb = endpoint.verb();
        let path = endpoint.path().to_string();
        self.registry.register(endpoint)?;

        let method_router = on_verb(
            verb,
            move |context: ApiContext, BearerCredential(credential): BearerCredential, body: Bytes| {
                let handler = handler.clone();
                let request_schema = Arc::clone(&request_schema);
                let response_schema = Arc::clone(&response_schema);
                async move {
                    let input = match parse_body(request_schema.as_ref(), &body) {
                        Ok(input) => input,
                        Err(err) => return err.into_response(),
                    };
                    match handler(context, input, credential).await {
                        Ok(output) => render_body(response_schema.as_ref(), output),
                        Err(err) => err.into_response(),
                    }
                }
            },
        );
        self.bind(&path, method_router);
        Ok(self)
    }

    /// Freeze the endpoint list and produce the router
    ///
    /// Adds the specification route, and the policy route when the API info
    /// carries a policy provider.
    pub fn into_router(self) -> Router {
        let Self {
            info,
            registry,
            router,
        } = self;

        let policy = info.policy().map(|provider| PolicyService::new(Arc::clone(provider)));
        let description = Arc::new(ApiDescription::new(info, registry.into_endpoints()));
        info!(
            endpoints = description.endpoints().len(),
            policy = policy.is_some(),
            "GPT API router ready"
        );

        let router = router.route(
            SCHEMA_PATH,
            routing::get(handlers::schema::serve_schema).with_state(description),
        );

        match policy {
            Some(service) => router.route(
                POLICY_PATH,
                routing::get(handlers::policy::serve_policy).with_state(service),
            ),
            None => {
                debug!("No policy configured; {POLICY_PATH} will not be served");
                router
            },
        }
    }
}
