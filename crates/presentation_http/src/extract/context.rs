//! Per-request context handed to endpoint handlers

use std::{collections::HashMap, convert::Infallible};

use axum::{
    extract::{FromRequestParts, Path},
    http::{HeaderMap, Method, Uri, request::Parts},
};

use crate::middleware::RequestId;

/// Request metadata available to every handler
///
/// Bodies are consumed by validation, so the context carries everything
/// else a handler might need: the route parameters, the headers, and the
/// correlation id assigned by [`RequestIdLayer`](crate::middleware::RequestIdLayer).
#[derive(Debug, Clone)]
pub struct ApiContext {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub path_params: HashMap<String, String>,
    pub request_id: Option<RequestId>,
}

impl ApiContext {
    /// A path parameter by name
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// A header value, if present and visible ASCII
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl<S> FromRequestParts<S> for ApiContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Routes without parameters reject the extractor
        let path_params = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        Ok(Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            path_params,
            request_id: parts.extensions.get::<RequestId>().copied(),
        })
    }
}
