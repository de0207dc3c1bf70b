//! API error handling
//!
//! Every failure the framework itself produces is rendered as
//! `{ "error", "code", "details"? }`. Internal details (failing response
//! payloads, provider errors) are only included while exposure is enabled.

use std::sync::atomic::{AtomicBool, Ordering};

use application::{ApplicationError, ValidationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
///
/// # Arguments
///
/// * `expose` - If `true`, internal error details will be included in responses.
///   If `false`, only generic error messages will be returned.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The request body does not match the endpoint's request schema
    #[error("Invalid request: {0}")]
    RequestValidation(ValidationError),

    /// The handler produced a value that does not match the response schema
    #[error("Invalid response: {0}")]
    ResponseValidation(ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Status code this error is served with
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::RequestValidation(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            },
            Self::ResponseValidation(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "invalid_json",
            Self::RequestValidation(_) => "validation_error",
            Self::ResponseValidation(_) => "response_validation_error",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, details) = match self {
            Self::InvalidJson(msg) => (format!("Invalid JSON: {msg}"), None),
            // The caller needs the violations to fix the request
            Self::RequestValidation(err) => (
                "Request body does not match the schema".to_string(),
                Some(err.violations().join("; ")),
            ),
            Self::ResponseValidation(err) => {
                error!(error = %err, "Handler result does not match the response schema");
                let details = should_expose_details().then(|| err.violations().join("; "));
                ("The endpoint produced an invalid response".to_string(), details)
            },
            Self::BadRequest(msg) => (msg, None),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                // Internal errors should never leak details in production
                let details = should_expose_details().then_some(msg);
                ("An internal error occurred".to_string(), details)
            },
        };

        if status.is_client_error() {
            warn!(code, "Rejected request");
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(e) => Self::RequestValidation(e),
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Configuration(msg)
            | ApplicationError::Policy(msg)
            | ApplicationError::Serialization(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
