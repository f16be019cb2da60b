//! Status-class dispatch and success-body parsing.

use hyper::ext::ReasonPhrase;
use reqwest::StatusCode;

use crate::error::LookupError;
use crate::types::{Address, LookupResult, SearchResponse};

/// The three response classes the handler distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Redirection,
    Other,
}

impl StatusClass {
    #[must_use]
    pub fn of(status: StatusCode) -> Self {
        match status.as_u16() {
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirection,
            _ => StatusClass::Other,
        }
    }
}

/// Reason phrase reported for `status`.
///
/// hyper only records the phrase from the status line when it differs from
/// the canonical one, so `wire` is `None` for ordinary responses. Falls back
/// to the canonical phrase, then to `Unknown` for unregistered codes.
#[must_use]
pub fn status_message(status: StatusCode, wire: Option<&ReasonPhrase>) -> String {
    match wire {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

/// Builds the result for a response that carries no body of interest.
///
/// `wire` is the reason phrase hyper stored in the response extensions.
/// Returns `None` for 2xx, whose body still has to be read and parsed.
#[must_use]
pub fn classify_status(
    status: StatusCode,
    wire: Option<&ReasonPhrase>,
) -> Option<LookupResult> {
    match StatusClass::of(status) {
        StatusClass::Success => None,
        StatusClass::Redirection => Some(LookupResult::Redirected {
            status_code: status.as_u16(),
            status_message: status_message(status, wire),
        }),
        StatusClass::Other => Some(LookupResult::UpstreamError {
            status_code: status.as_u16(),
            status_message: status_message(status, wire),
        }),
    }
}

/// Parses a 2xx body and takes the first hit.
///
/// # Errors
///
/// - [`LookupError::Deserialize`] if `body` is not a JSON search response.
/// - [`LookupError::EmptyResults`] if `results` is empty, null or missing.
pub fn parse_search_body(body: &str, context: &str) -> Result<LookupResult, LookupError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|source| LookupError::Deserialize {
            context: context.to_string(),
            source,
        })?;

    let first = response
        .results
        .and_then(|hits| hits.into_iter().next())
        .ok_or(LookupError::EmptyResults {
            upstream_message: response.message,
        })?;

    Ok(LookupResult::Success(Address::from(first)))
}
