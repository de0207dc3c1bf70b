//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod policy_port;
mod schema_port;

#[cfg(test)]
pub use policy_port::MockPolicyProvider;
pub use policy_port::{
    AsyncFnPolicy, FnPolicy, PolicyProvider, StaticPolicy, async_policy_fn, policy_fn,
};
#[cfg(test)]
pub use schema_port::MockSchemaDescriptor;
pub use schema_port::{Schema, SchemaDescriptor};
