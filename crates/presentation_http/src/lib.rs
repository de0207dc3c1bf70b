//! GPT action API HTTP layer
//!
//! Turns registered endpoints into an axum [`Router`](axum::Router):
//! request bodies are validated before handlers run, handler results are
//! validated before they are sent, and the specification document and
//! optional policy are served at fixed routes.

pub mod demo;
pub mod error;
pub mod extract;
pub mod gpt_api;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use extract::{ApiContext, BearerCredential};
pub use gpt_api::GptApi;
pub use middleware::{RequestId, RequestIdLayer};
pub use routes::create_router;
