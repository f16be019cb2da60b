use serde::{Deserialize, Serialize};

/// One incoming lookup. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub postal_code: String,
}

impl LookupRequest {
    #[must_use]
    pub fn new(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
        }
    }
}

/// Display fields taken from the first search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub postal_code: String,
    pub prefecture: String,
    pub city: String,
    pub suburb: String,
}

/// Outcome of a single lookup. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Success(Address),
    /// 3xx from upstream. The `Location` header is never followed.
    Redirected {
        status_code: u16,
        status_message: String,
    },
    /// 1xx, 4xx or 5xx from upstream.
    UpstreamError {
        status_code: u16,
        status_message: String,
    },
    /// Connection failure, timeout, malformed JSON or an empty result set.
    TransportError { message: String },
}

impl LookupResult {
    /// Stable snake_case tag used in logs and rendered output.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            LookupResult::Success(_) => "success",
            LookupResult::Redirected { .. } => "redirected",
            LookupResult::UpstreamError { .. } => "upstream_error",
            LookupResult::TransportError { .. } => "transport_error",
        }
    }

    /// Human-readable line for the non-success variants.
    #[must_use]
    pub fn display_message(&self) -> Option<String> {
        match self {
            LookupResult::Success(_) => None,
            LookupResult::Redirected {
                status_code,
                status_message,
            } => Some(format!(
                "Redirection: code={status_code} message={status_message}"
            )),
            LookupResult::UpstreamError {
                status_code,
                status_message,
            } => Some(format!(
                "HTTP ERROR: code={status_code} message={status_message}"
            )),
            LookupResult::TransportError { message } => Some(message.clone()),
        }
    }

    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        match self {
            LookupResult::Success(address) => Some(address),
            _ => None,
        }
    }
}

impl From<&crate::LookupError> for LookupResult {
    fn from(err: &crate::LookupError) -> Self {
        LookupResult::TransportError {
            message: err.to_string(),
        }
    }
}

/// Body of a 2xx response from the search endpoint.
///
/// zipcloud sends `results: null` together with a `message` when nothing
/// matched or the parameter was rejected, so both are optional.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub zipcode: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
}

impl From<SearchHit> for Address {
    fn from(hit: SearchHit) -> Self {
        Self {
            postal_code: hit.zipcode,
            prefecture: hit.address1,
            city: hit.address2,
            suburb: hit.address3,
        }
    }
}
