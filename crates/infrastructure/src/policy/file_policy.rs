//! File-backed policy provider
//!
//! Reads the policy from disk on every request, so edits to the file are
//! served without a restart.

use std::path::{Path, PathBuf};

use application::{ApplicationError, PolicyProvider};
use async_trait::async_trait;
use tracing::{instrument, warn};

/// Serves the contents of a file as the policy
#[derive(Debug, Clone)]
pub struct FilePolicyProvider {
    path: PathBuf,
}

impl FilePolicyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PolicyProvider for FilePolicyProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn policy(&self) -> Result<String, ApplicationError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(error = %e, "Failed to read policy file");
            ApplicationError::Policy(format!(
                "Failed to read policy file {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(&path, "  This is a privacy policy\n").unwrap();

        let provider = FilePolicyProvider::new(&path);
        assert_eq!(provider.path(), path);
        assert_eq!(
            provider.policy().await.unwrap(),
            "  This is a privacy policy\n"
        );
    }

    #[tokio::test]
    async fn picks_up_changes_between_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(&path, "first").unwrap();

        let provider = FilePolicyProvider::new(&path);
        assert_eq!(provider.policy().await.unwrap(), "first");

        std::fs::write(&path, "second").unwrap();
        assert_eq!(provider.policy().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn missing_file_is_a_policy_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FilePolicyProvider::new(dir.path().join("missing.txt"));

        let err = provider.policy().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Policy(_)));
        assert!(err.to_string().contains("missing.txt"));
    }
}
