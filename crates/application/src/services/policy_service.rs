//! Policy document service
//!
//! Invokes the configured provider and classifies the trimmed result as
//! html or plain text for the policy route.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::PolicyProvider};

/// Suffix that marks a policy as an html document
const HTML_CLOSING_TAG: &str = "</html>";

/// How a policy document is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    Html,
    Text,
}

impl PolicyFormat {
    /// Content type header value for this format
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Text => "text/plain; charset=utf-8",
        }
    }
}

/// A trimmed policy ready to be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument {
    content: String,
    format: PolicyFormat,
}

impl PolicyDocument {
    /// Trim raw provider output and detect its format
    ///
    /// Detection is a case-sensitive suffix check on the trimmed text.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let content = raw.trim();
        let format = if content.ends_with(HTML_CLOSING_TAG) {
            PolicyFormat::Html
        } else {
            PolicyFormat::Text
        };
        Self {
            content: content.to_string(),
            format,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn format(&self) -> PolicyFormat {
        self.format
    }

    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }
}

/// Produces policy documents from a provider
#[derive(Clone)]
pub struct PolicyService {
    provider: Arc<dyn PolicyProvider>,
}

impl std::fmt::Debug for PolicyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyService").finish_non_exhaustive()
    }
}

impl PolicyService {
    pub fn new(provider: Arc<dyn PolicyProvider>) -> Self {
        Self { provider }
    }

    /// Invoke the provider and prepare its output for serving
    ///
    /// # Errors
    ///
    /// Propagates the provider's error.
    #[instrument(skip(self))]
    pub async fn document(&self) -> Result<PolicyDocument, ApplicationError> {
        let raw = self.provider.policy().await?;
        let document = PolicyDocument::from_raw(&raw);
        debug!(format = ?document.format(), len = document.content().len(), "Policy produced");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockPolicyProvider;

    #[test]
    fn html_is_detected_after_trimming() {
        let document = PolicyDocument::from_raw("  <html><body>Hi</body></html>  \n");
        assert_eq!(document.content(), "<html><body>Hi</body></html>");
        assert_eq!(document.format(), PolicyFormat::Html);
        assert_eq!(document.format().content_type(), "text/html; charset=utf-8");
    }

    #[test]
    fn plain_text_is_trimmed() {
        let document = PolicyDocument::from_raw("\n This is a privacy policy \t");
        assert_eq!(document.content(), "This is a privacy policy");
        assert_eq!(document.format(), PolicyFormat::Text);
        assert_eq!(document.format().content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn html_inside_text_is_not_html() {
        let document = PolicyDocument::from_raw("<html></html> and more");
        assert_eq!(document.format(), PolicyFormat::Text);
    }

    #[test]
    fn detection_is_case_sensitive() {
        let document = PolicyDocument::from_raw("<HTML></HTML>");
        assert_eq!(document.format(), PolicyFormat::Text);
    }

    #[test]
    fn empty_policy_is_text() {
        let document = PolicyDocument::from_raw("   ");
        assert_eq!(document.clone().into_content(), "");
        assert_eq!(document.format(), PolicyFormat::Text);
    }

    #[tokio::test]
    async fn service_invokes_provider_each_time() {
        let mut provider = MockPolicyProvider::new();
        provider
            .expect_policy()
            .times(2)
            .returning(|| Ok(" <html></html> ".to_string()));

        let service = PolicyService::new(Arc::new(provider));
        for _ in 0..2 {
            let document = service.document().await.unwrap();
            assert_eq!(document.content(), "<html></html>");
        }
    }

    #[tokio::test]
    async fn service_propagates_provider_errors() {
        let mut provider = MockPolicyProvider::new();
        provider
            .expect_policy()
            .returning(|| Err(ApplicationError::Policy("unreadable".to_string())));

        let service = PolicyService::new(Arc::new(provider));
        let err = service.document().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Policy(_)));
    }
}
