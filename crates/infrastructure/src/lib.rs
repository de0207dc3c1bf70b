//! Infrastructure layer - Adapters for schemas, configuration and logging
//!
//! Implements the ports defined in the application layer: JSON Schema
//! backed [`Schema`](application::Schema) types and file-backed policy
//! providers. Also owns configuration loading and `tracing` setup.

pub mod config;
pub mod policy;
pub mod schema;
pub mod telemetry;

pub use config::{AppConfig, ApiInfoConfig, ServerConfig};
pub use policy::FilePolicyProvider;
pub use schema::{JsonValueSchema, TypedSchema, ValidatedSchema};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
