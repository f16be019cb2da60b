use thiserror::Error;

/// Failures that stop a lookup before a status-classified result exists.
///
/// Every variant is folded into [`crate::LookupResult::TransportError`] at
/// the handler boundary.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network, TLS or protocol failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Connect or read phase exceeded its configured timeout.
    #[error("upstream request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// A 2xx body that is not JSON or not shaped like a search response.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx body whose `results` array is empty, null or absent.
    #[error("upstream returned no results{}", upstream_detail(.upstream_message.as_deref()))]
    EmptyResults { upstream_message: Option<String> },

    #[error("invalid upstream base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout(err)
        } else {
            LookupError::Http(err)
        }
    }
}

fn upstream_detail(message: Option<&str>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_without_upstream_message() {
        let err = LookupError::EmptyResults {
            upstream_message: None,
        };
        assert_eq!(err.to_string(), "upstream returned no results");
    }

    #[test]
    fn empty_results_carries_upstream_message() {
        let err = LookupError::EmptyResults {
            upstream_message: Some("必須パラメータが指定されていません。".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "upstream returned no results (必須パラメータが指定されていません。)"
        );
    }

    #[test]
    fn blank_upstream_message_is_dropped() {
        let err = LookupError::EmptyResults {
            upstream_message: Some("  ".to_string()),
        };
        assert_eq!(err.to_string(), "upstream returned no results");
    }
}
