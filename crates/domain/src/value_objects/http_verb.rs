//! HTTP verb value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Supported HTTP verbs
///
/// The set is closed: endpoints can only be registered for these methods.
/// Serialized in lowercase, which is also the key used for operations in
/// the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    /// All supported verbs in declaration order
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Delete, Self::Patch];

    /// Lowercase name as used for operation keys
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
        }
    }

    /// Whether requests with this verb normally carry a body
    #[must_use]
    pub const fn accepts_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl std::str::FromStr for HttpVerb {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            "patch" => Ok(Self::Patch),
            _ => Err(DomainError::UnsupportedVerb(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("GET".parse::<HttpVerb>().unwrap(), HttpVerb::Get);
        assert_eq!("post".parse::<HttpVerb>().unwrap(), HttpVerb::Post);
        assert_eq!("Patch".parse::<HttpVerb>().unwrap(), HttpVerb::Patch);
        assert_eq!(" delete ".parse::<HttpVerb>().unwrap(), HttpVerb::Delete);
    }

    #[test]
    fn rejects_unsupported_verbs() {
        for verb in ["head", "options", "trace", "connect", ""] {
            let result = verb.parse::<HttpVerb>();
            assert_eq!(
                result,
                Err(DomainError::UnsupportedVerb(verb.to_string())),
                "{verb} should be rejected"
            );
        }
    }

    #[test]
    fn display_is_uppercase() {
        assert_eq!(HttpVerb::Get.to_string(), "GET");
        assert_eq!(HttpVerb::Delete.to_string(), "DELETE");
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for verb in HttpVerb::ALL {
            assert_eq!(verb.as_str().parse::<HttpVerb>().unwrap(), verb);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&HttpVerb::Put).unwrap();
        assert_eq!(json, "\"put\"");
        let verb: HttpVerb = serde_json::from_str("\"patch\"").unwrap();
        assert_eq!(verb, HttpVerb::Patch);
    }

    #[test]
    fn body_carrying_verbs() {
        assert!(HttpVerb::Post.accepts_body());
        assert!(HttpVerb::Put.accepts_body());
        assert!(HttpVerb::Patch.accepts_body());
        assert!(!HttpVerb::Get.accepts_body());
        assert!(!HttpVerb::Delete.accepts_body());
    }
}
