//! HTTP request handlers for the framework's own routes

pub mod health;
pub mod policy;
pub mod schema;
