//! Property-based tests using proptest
//!
//! These tests verify the expected-status rule and endpoint URL
//! building using randomized inputs.

use launchdarkly_provider::launchdarkly::http::status_accepted;
use launchdarkly_provider::launchdarkly::urls;
use proptest::prelude::*;

/// Generate an HTTP status code
fn arb_status() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(200u16),
        Just(201u16),
        Just(204u16),
        Just(404u16),
        100u16..600u16,
    ]
}

/// Generate an expected status set (possibly empty)
fn arb_expected() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(arb_status(), 0..5)
}

/// Generate a LaunchDarkly-style key, sometimes with characters that need encoding
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof!["[a-z][a-z0-9-]{0,30}", "[a-zA-Z0-9 /?#%._-]{1,20}"]
}

proptest! {
    #[test]
    fn status_accepted_iff_empty_or_member(expected in arb_expected(), status in arb_status()) {
        let accepted = status_accepted(&expected, status);
        prop_assert_eq!(accepted, expected.is_empty() || expected.contains(&status));
    }

    #[test]
    fn empty_set_accepts_every_status(status in 0u16..1000) {
        prop_assert!(status_accepted(&[], status));
    }

    #[test]
    fn order_of_expected_set_does_not_matter(
        mut expected in arb_expected(),
        status in arb_status(),
    ) {
        let before = status_accepted(&expected, status);
        expected.reverse();
        prop_assert_eq!(before, status_accepted(&expected, status));
    }

    #[test]
    fn project_key_stays_in_one_path_segment(key in arb_key()) {
        let base = "https://app.launchdarkly.com/api/v2";
        let url = urls::project_url(base, &key);

        let segment = url.strip_prefix("https://app.launchdarkly.com/api/v2/projects/").unwrap();
        prop_assert!(!segment.contains('/'));
        prop_assert!(!segment.contains('?'));
        prop_assert!(!segment.contains('#'));
        prop_assert_eq!(urlencoding::decode(segment).unwrap(), key);
    }

    #[test]
    fn environment_url_nests_under_project(project in arb_key(), env in arb_key()) {
        let base = "http://localhost";
        let env_url = urls::environment_url(base, &project, &env);
        let prefix = format!("{}/", urls::environments_url(base, &project));
        prop_assert!(env_url.starts_with(&prefix));
    }
}
