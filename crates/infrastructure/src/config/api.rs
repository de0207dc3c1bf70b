//! API metadata configuration.

use std::{path::PathBuf, sync::Arc};

use application::{ApiInfo, StaticPolicy};
use serde::{Deserialize, Serialize};

use crate::policy::FilePolicyProvider;

/// Metadata advertised in the specification document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfoConfig {
    /// Public base URL, listed as the document's server
    #[serde(default = "default_url")]
    pub url: String,

    /// API title
    #[serde(default = "default_title")]
    pub title: String,

    /// What the API is for
    #[serde(default = "default_description")]
    pub description: String,

    /// API version
    #[serde(default = "default_version")]
    pub version: String,

    /// File whose contents are served as the policy (re-read per request)
    #[serde(default)]
    pub policy_file: Option<PathBuf>,

    /// Inline policy text, used when no policy file is set
    #[serde(default)]
    pub policy_text: Option<String>,
}

fn default_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_title() -> String {
    "GPT Action API".to_string()
}

fn default_description() -> String {
    "An API for a custom GPT to use".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for ApiInfoConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            title: default_title(),
            description: default_description(),
            version: default_version(),
            policy_file: None,
            policy_text: None,
        }
    }
}

impl ApiInfoConfig {
    /// Build API metadata, attaching a policy provider when one is configured
    ///
    /// A policy file takes precedence over inline text.
    #[must_use]
    pub fn into_api_info(self) -> ApiInfo {
        let info = ApiInfo::new(self.url, self.title, self.description, self.version);
        match (self.policy_file, self.policy_text) {
            (Some(path), _) => info.with_policy(Arc::new(FilePolicyProvider::new(path))),
            (None, Some(text)) => info.with_policy(Arc::new(StaticPolicy::new(text))),
            (None, None) => info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_policy() {
        let info = ApiInfoConfig::default().into_api_info();
        assert_eq!(info.title(), "GPT Action API");
        assert_eq!(info.version(), "1.0.0");
        assert!(!info.has_policy());
    }

    #[tokio::test]
    async fn inline_text_becomes_static_policy() {
        let config = ApiInfoConfig {
            policy_text: Some("Be nice".to_string()),
            ..ApiInfoConfig::default()
        };
        let info = config.into_api_info();
        let provider = info.policy().unwrap();
        assert_eq!(provider.policy().await.unwrap(), "Be nice");
    }

    #[tokio::test]
    async fn policy_file_wins_over_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.html");
        std::fs::write(&path, "<html>file</html>").unwrap();

        let config = ApiInfoConfig {
            policy_file: Some(path),
            policy_text: Some("inline".to_string()),
            ..ApiInfoConfig::default()
        };
        let info = config.into_api_info();
        let provider = info.policy().unwrap();
        assert_eq!(provider.policy().await.unwrap(), "<html>file</html>");
    }
}
