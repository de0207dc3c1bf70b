//! Domain layer for the GPT action API framework
//!
//! Contains the closed HTTP verb set, endpoint path patterns, bearer
//! credentials and the errors raised while describing an API surface.
//! Nothing here knows about HTTP servers or schema libraries.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
