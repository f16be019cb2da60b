//! HTTP client for the upstream postal-code search endpoint.

use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::{redirect, Client, Url};

use crate::classify::{classify_status, parse_search_body};
use crate::encode::encode_query;
use crate::error::LookupError;
use crate::types::LookupResult;

pub const DEFAULT_BASE_URL: &str = "http://zipcloud.ibsnet.co.jp";
const SEARCH_PATH: &str = "api/search";

/// Immutable settings for one outbound lookup.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Scheme, host, port and optional path prefix of the upstream service.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub user_agent: String,
}

impl LookupConfig {
    /// Takes the upstream endpoint, timeouts and user agent from the
    /// process configuration.
    #[must_use]
    pub fn from_app_config(config: &zipaddr_core::AppConfig) -> Self {
        Self {
            base_url: config.upstream_base_url.clone(),
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
            user_agent: "zipaddr/0.1 (address-lookup)".to_string(),
        }
    }
}

/// Client for the `/api/search` endpoint.
///
/// Redirects are never followed and no request is retried. Use
/// [`LookupConfig::base_url`] to point at a mock server in tests.
pub struct AddressClient {
    client: Client,
    endpoint: Url,
}

impl AddressClient {
    /// Builds a client with the configured connect and read timeouts.
    ///
    /// The overall request deadline is the sum of both, so a stalled
    /// upstream fails after at most `connect_timeout + read_timeout`.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`LookupError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let endpoint = search_endpoint(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.connect_timeout + config.read_timeout)
            .redirect(redirect::Policy::none())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The search endpoint with `postal_code` as its only query parameter.
    #[must_use]
    pub fn build_url(&self, postal_code: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(Some(encode_query(postal_code).as_str()));
        url
    }

    /// Issues one GET and classifies the response.
    ///
    /// 3xx and non-2xx statuses are successful calls from the client's point
    /// of view and come back as `Ok` with the matching [`LookupResult`].
    ///
    /// # Errors
    ///
    /// - [`LookupError::Timeout`] if connecting or reading exceeds its budget.
    /// - [`LookupError::Http`] on any other network failure.
    /// - [`LookupError::Deserialize`] if a 2xx body is not a search response.
    /// - [`LookupError::EmptyResults`] if a 2xx body has no first hit.
    pub async fn fetch(&self, postal_code: &str) -> Result<LookupResult, LookupError> {
        let url = self.build_url(postal_code);
        tracing::debug!(url = %url, "querying address upstream");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        let wire_reason = response.extensions().get::<ReasonPhrase>();
        if let Some(result) = classify_status(status, wire_reason) {
            return Ok(result);
        }

        let body = response.text().await?;
        parse_search_body(&body, url.as_str())
    }
}

/// Resolves `<base>/api/search`, keeping any path prefix on `base`.
fn search_endpoint(base_url: &str) -> Result<Url, LookupError> {
    let invalid = |reason: String| LookupError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    base.join(SEARCH_PATH).map_err(|e| invalid(e.to_string()))
}
