//! Endpoint path pattern value object

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use crate::errors::DomainError;

/// A validated URL path pattern
///
/// Patterns use OpenAPI placeholders (`/items/{id}`), which is also the
/// syntax the HTTP router understands. A placeholder must fill a whole
/// segment; a trailing `{*rest}` segment captures the remainder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EndpointPath(String);

impl EndpointPath {
    /// Validate and wrap a path pattern
    pub fn parse(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();

        if !path.starts_with('/') {
            return Err(DomainError::invalid_path(path, "must start with '/'"));
        }
        if let Some(c) = path
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '?' | '#'))
        {
            return Err(DomainError::invalid_path(
                path.clone(),
                format!("must not contain {c:?}"),
            ));
        }

        let segments: Vec<&str> = path.split('/').skip(1).collect();
        let last = segments.len().saturating_sub(1);
        let mut names = HashSet::new();
        for (index, segment) in segments.iter().enumerate() {
            if segment.starts_with(':') || segment.starts_with('*') {
                return Err(DomainError::invalid_path(
                    path.clone(),
                    format!("segment '{segment}' must use {{name}} placeholders"),
                ));
            }
            if !segment.contains(['{', '}']) {
                continue;
            }
            let Some(name) = segment
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
            else {
                return Err(DomainError::invalid_path(
                    path.clone(),
                    format!("placeholder in '{segment}' must span the whole segment"),
                ));
            };
            let (wildcard, name) = name
                .strip_prefix('*')
                .map_or((false, name), |rest| (true, rest));
            if name.is_empty()
                || !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(DomainError::invalid_path(
                    path.clone(),
                    format!("placeholder '{segment}' needs a plain name"),
                ));
            }
            if !names.insert(name) {
                return Err(DomainError::invalid_path(
                    path.clone(),
                    format!("parameter '{name}' appears more than once"),
                ));
            }
            if wildcard && index != last {
                return Err(DomainError::invalid_path(
                    path.clone(),
                    "wildcard placeholder must be the last segment",
                ));
            }
        }

        Ok(Self(path))
    }

    /// The path pattern as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names of the placeholders, in order
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.0
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .map(|name| name.trim_start_matches('*'))
    }

    /// The pattern with placeholder names erased
    ///
    /// Two patterns with the same shape match exactly the same URLs.
    #[must_use]
    pub fn shape(&self) -> String {
        self.0
            .split('/')
            .map(|segment| match segment.strip_prefix('{') {
                Some(rest) if rest.starts_with('*') => "{*}",
                Some(_) => "{}",
                None => segment,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether the router would refuse to hold both patterns
    ///
    /// After a common prefix, two different placeholders at the same
    /// position conflict: differently named parameters, or a parameter next
    /// to a catch-all. Static segments may sit next to either.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        for (a, b) in self.0.split('/').zip(other.0.split('/')) {
            if a == b {
                continue;
            }
            return a.starts_with('{') && b.starts_with('{');
        }
        false
    }
}

impl fmt::Display for EndpointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EndpointPath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EndpointPath> for String {
    fn from(path: EndpointPath) -> Self {
        path.0
    }
}
