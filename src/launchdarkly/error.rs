//! Error types for LaunchDarkly API calls

use thiserror::Error;

/// Errors produced by a single request against the LaunchDarkly API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body could not be encoded as JSON. Nothing was sent.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request never produced a response (DNS, connect, TLS, ...)
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but its body could not be drained
    #[error("Failed to read response body of {method} {url}: {source}")]
    Read {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(
        "{method} {url} did not return one of the expected HTTP status codes. \
         Got HTTP {status}\n{body}"
    )]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape the caller asked for
    #[error("Failed to parse response of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            ApiError::Transport { source, .. } | ApiError::Read { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Format an API error for display
/// Maps well-known statuses to short hints, keeps the rest truncated
pub fn format_api_error(error: &ApiError) -> String {
    match error.status() {
        Some(401) => {
            return "Authentication failed. Check your LaunchDarkly access token.".to_string()
        }
        Some(403) => {
            return "Permission denied. The access token lacks the required role.".to_string()
        }
        Some(404) => return "Resource not found.".to_string(),
        Some(409) => return "Resource conflict. The project key may already be in use.".to_string(),
        Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
        Some(s) if s >= 500 => {
            return "LaunchDarkly service temporarily unavailable. Please try again.".to_string()
        }
        _ => {}
    }

    let error_str = error.to_string();
    let first_line = error_str.lines().next().unwrap_or_default();
    let sanitized = first_line
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(200)
        .collect::<String>();

    if sanitized.len() < first_line.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

/// Hint for display followed by the first line of the error itself, so the
/// method, URL and status stay visible
pub fn describe_api_error(error: &ApiError) -> String {
    let hint = format_api_error(error);
    let full = error.to_string();
    let detail = full.lines().next().unwrap_or_default();

    if hint == detail {
        hint
    } else {
        format!("{}\n  {}", hint, detail)
    }
}
