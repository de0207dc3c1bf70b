//! Policy document handler

use application::PolicyService;
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Serve the trimmed policy as html or plain text
///
/// The provider runs on every request.
pub async fn serve_policy(State(service): State<PolicyService>) -> Result<Response, ApiError> {
    let document = service.document().await?;
    let content_type = document.format().content_type();
    Ok(([(CONTENT_TYPE, content_type)], document.into_content()).into_response())
}
