//! Application layer - Endpoint registry, schema ports and document synthesis
//!
//! Defines the schema capability the HTTP layer validates against, the
//! canonical endpoint records, and the services that turn those records
//! into a specification document or a policy response. Adapters in the
//! infrastructure layer implement the ports.

pub mod api_info;
pub mod endpoint;
pub mod error;
pub mod ports;
pub mod services;

pub use api_info::ApiInfo;
pub use endpoint::{
    DEFAULT_REQUEST_DESC, DEFAULT_RESPONSE_DESC, EndpointDefinition, InEndpointDefinition,
    InOutEndpointDefinition, OutEndpointDefinition,
};
pub use error::{ApplicationError, ValidationError};
pub use ports::*;
pub use services::*;
