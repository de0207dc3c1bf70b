//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{Credential, EndpointPath, HttpVerb};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,10}"
}

fn placeholder() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_map(|name| format!("{{{name}}}"))
}

fn path_pattern() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![3 => segment(), 1 => placeholder()], 1..6).prop_map(
        |segments| {
            // Parameter names must be unique within a pattern
            let segments: Vec<String> = segments
                .into_iter()
                .enumerate()
                .map(|(index, segment)| match segment.strip_suffix('}') {
                    Some(open) => format!("{open}_{index}}}"),
                    None => segment,
                })
                .collect();
            format!("/{}", segments.join("/"))
        },
    )
}

// ============================================================================
// EndpointPath Property Tests
// ============================================================================

mod endpoint_path_tests {
    use super::*;

    proptest! {
        #[test]
        fn well_formed_patterns_parse(path in path_pattern()) {
            let parsed = EndpointPath::parse(path.clone());
            prop_assert!(parsed.is_ok());
            let parsed = parsed.unwrap();
            prop_assert_eq!(parsed.as_str(), path.as_str());
        }

        #[test]
        fn parameters_match_placeholders(path in path_pattern()) {
            let parsed = EndpointPath::parse(path.clone()).unwrap();
            let expected = path.matches('{').count();
            prop_assert_eq!(parsed.parameters().count(), expected);
        }

        #[test]
        fn shape_ignores_parameter_names(
            prefix in segment(),
            first in "[a-z]{1,8}",
            second in "[a-z]{1,8}"
        ) {
            let a = EndpointPath::parse(format!("/{prefix}/{{{first}}}")).unwrap();
            let b = EndpointPath::parse(format!("/{prefix}/{{{second}}}")).unwrap();
            prop_assert_eq!(a.shape(), b.shape());
        }

        #[test]
        fn relative_paths_rejected(path in "[a-z][a-z/]{0,20}") {
            prop_assert!(EndpointPath::parse(path).is_err());
        }

        #[test]
        fn colon_parameters_rejected(prefix in segment(), name in "[a-z]{1,8}") {
            let path = format!("/{prefix}/:{name}");
            prop_assert!(EndpointPath::parse(path).is_err());
        }
    }
}

// ============================================================================
// HttpVerb Property Tests
// ============================================================================

mod http_verb_tests {
    use super::*;

    proptest! {
        #[test]
        fn display_round_trips(index in 0usize..5) {
            let verb = HttpVerb::ALL[index];
            prop_assert_eq!(verb.to_string().parse::<HttpVerb>().unwrap(), verb);
            prop_assert_eq!(verb.as_str().parse::<HttpVerb>().unwrap(), verb);
        }

        #[test]
        fn unknown_verbs_rejected(name in "[a-z]{1,10}") {
            let known = HttpVerb::ALL.iter().any(|verb| verb.as_str() == name);
            prop_assert_eq!(name.parse::<HttpVerb>().is_ok(), known);
        }
    }
}

// ============================================================================
// Credential Property Tests
// ============================================================================

mod credential_tests {
    use super::*;

    proptest! {
        #[test]
        fn everything_after_the_scheme_is_kept(token in "[A-Za-z0-9 ]{0,64}") {
            let header = format!("Bearer {token}");
            let credential = Credential::from_authorization_header(Some(&header));
            prop_assert_eq!(credential.map(Credential::into_inner), Some(token));
        }

        #[test]
        fn other_schemes_yield_nothing(token in "[A-Za-z0-9]{1,32}") {
            let header = format!("Basic {token}");
            prop_assert!(Credential::from_authorization_header(Some(&header)).is_none());
        }

        #[test]
        fn debug_never_shows_token(token in "[0-9]{8,32}") {
            let credential = Credential::new(token.clone());
            let debug = format!("{credential:?}");
            prop_assert!(!debug.contains(&token));
        }
    }
}
