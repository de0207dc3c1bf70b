//! Request extractors handed to endpoint handlers

mod context;
mod credential;

pub use context::ApiContext;
pub use credential::BearerCredential;
