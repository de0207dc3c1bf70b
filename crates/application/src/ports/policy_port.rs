//! Policy provider port
//!
//! Produces the text served at the policy route. Providers are invoked on
//! every request, so a provider may return fresh content each time.

use std::{fmt, future::Future, sync::Arc};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Source of the policy document
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PolicyProvider: Send + Sync {
    /// Produce the raw (untrimmed) policy text
    async fn policy(&self) -> Result<String, ApplicationError>;
}

/// A policy that never changes
#[derive(Debug, Clone)]
pub struct StaticPolicy(String);

impl StaticPolicy {
    /// Create a static policy from text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait]
impl PolicyProvider for StaticPolicy {
    async fn policy(&self) -> Result<String, ApplicationError> {
        Ok(self.0.clone())
    }
}

/// Policy produced by a synchronous closure
pub struct FnPolicy<F>(F);

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> PolicyProvider for FnPolicy<F>
where
    F: Fn() -> String + Send + Sync,
{
    async fn policy(&self) -> Result<String, ApplicationError> {
        Ok((self.0)())
    }
}

/// Policy produced by an asynchronous closure
pub struct AsyncFnPolicy<F>(F);

impl<F> fmt::Debug for AsyncFnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnPolicy").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> PolicyProvider for AsyncFnPolicy<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = String> + Send,
{
    async fn policy(&self) -> Result<String, ApplicationError> {
        Ok((self.0)().await)
    }
}

/// Wrap a synchronous closure as a policy provider
pub fn policy_fn<F>(f: F) -> Arc<dyn PolicyProvider>
where
    F: Fn() -> String + Send + Sync + 'static,
{
    Arc::new(FnPolicy(f))
}

/// Wrap an asynchronous closure as a policy provider
pub fn async_policy_fn<F, Fut>(f: F) -> Arc<dyn PolicyProvider>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    Arc::new(AsyncFnPolicy(f))
}
