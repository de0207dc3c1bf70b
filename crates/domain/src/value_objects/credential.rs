//! Bearer credential value object

use std::fmt;

/// Prefix of a bearer `Authorization` header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// An opaque bearer token taken from the `Authorization` header
///
/// Extraction is purely syntactic: the token is neither validated nor
/// verified. Handlers decide what, if anything, it authorizes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Extract the token from an `Authorization` header value
    ///
    /// Returns the text after the first space when the header starts with
    /// `"Bearer "`, and `None` for a missing header or any other scheme.
    #[must_use]
    pub fn from_authorization_header(header: Option<&str>) -> Option<Self> {
        header
            .filter(|value| value.starts_with(BEARER_PREFIX))
            .and_then(|value| value.split_once(' '))
            .map(|(_, token)| Self(token.to_string()))
    }

    /// The raw token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw token
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tokens end up in logs through request spans; keep them out of Debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

impl AsRef<str> for Credential {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
