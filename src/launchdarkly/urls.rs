//! LaunchDarkly REST endpoint builders
//!
//! Keys are percent-encoded so a key can never escape its path segment.
//! Dot segments (`.` and `..`) are normalized away by URL parsing even when
//! encoded, so callers must reject them with [`is_valid_key`] first.

use urlencoding::encode;

/// Public API root used when no override is configured
pub const DEFAULT_BASE_URL: &str = "https://app.launchdarkly.com/api/v2";

/// Normalize a configured base URL (no trailing slash)
pub fn normalize_base_url(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

/// Whether `key` is a usable project or environment key: non-empty ASCII
/// letters, digits, `.`, `_` or `-`, and not a dot segment
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

pub fn projects_url(base: &str) -> String {
    format!("{}/projects", base)
}

pub fn project_url(base: &str, project_key: &str) -> String {
    format!("{}/projects/{}", base, encode(project_key))
}

pub fn environments_url(base: &str, project_key: &str) -> String {
    format!("{}/environments", project_url(base, project_key))
}

pub fn environment_url(base: &str, project_key: &str, environment_key: &str) -> String {
    format!(
        "{}/{}",
        environments_url(base, project_key),
        encode(environment_key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_project_urls() {
        assert_eq!(
            projects_url(DEFAULT_BASE_URL),
            "https://app.launchdarkly.com/api/v2/projects"
        );
        assert_eq!(
            project_url(DEFAULT_BASE_URL, "foo"),
            "https://app.launchdarkly.com/api/v2/projects/foo"
        );
    }

    #[test]
    fn builds_environment_urls() {
        assert_eq!(
            environment_url("http://localhost:1234", "foo", "production"),
            "http://localhost:1234/projects/foo/environments/production"
        );
    }

    #[test]
    fn encodes_path_segments() {
        assert_eq!(
            project_url("http://x", "a/b c"),
            "http://x/projects/a%2Fb%20c"
        );
    }

    #[test]
    fn accepts_ordinary_keys() {
        assert!(is_valid_key("default"));
        assert!(is_valid_key("mobile-app_v2.1"));
        assert!(is_valid_key("..hidden"));
    }

    #[test]
    fn rejects_dot_segments_and_separators() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("."));
        assert!(!is_valid_key(".."));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key("a b"));
        assert!(!is_valid_key("a?b"));
        assert!(!is_valid_key("%2e%2e"));
    }

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(normalize_base_url("http://x/api/v2//"), "http://x/api/v2");
    }
}
