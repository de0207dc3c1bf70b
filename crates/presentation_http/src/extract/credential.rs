//! Bearer credential extractor

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use domain::Credential;

/// The bearer token of a request, if it carries one
///
/// Never rejects: a missing header, another scheme, or a header value that
/// is not visible ASCII all yield `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerCredential(pub Option<Credential>);

impl BearerCredential {
    /// Read the credential from request headers
    pub fn from_parts(parts: &Parts) -> Self {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        Self(Credential::from_authorization_header(header))
    }

    #[must_use]
    pub fn into_inner(self) -> Option<Credential> {
        self.0
    }
}

impl<S> FromRequestParts<S> for BearerCredential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
