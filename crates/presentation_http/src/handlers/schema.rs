//! Specification document handler

use std::sync::Arc;

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, state::ApiDescription};

/// Content type the document is served with
pub const SCHEMA_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Serve the pretty-printed specification document
pub async fn serve_schema(
    State(description): State<Arc<ApiDescription>>,
) -> Result<Response, ApiError> {
    let text = description.document().to_pretty_json()?;
    Ok(([(CONTENT_TYPE, SCHEMA_CONTENT_TYPE)], text).into_response())
}
