//! Query-string encoding for the upstream search endpoint.

/// Name of the single query parameter the search endpoint accepts.
pub const ZIPCODE_PARAM: &str = "zipcode";

/// Serializes `postal_code` as `zipcode=<value>` using
/// `application/x-www-form-urlencoded` rules.
///
/// Spaces become `+`; anything outside the unreserved set, including every
/// non-ASCII character, becomes percent-escaped UTF-8.
#[must_use]
pub fn encode_query(postal_code: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair(ZIPCODE_PARAM, postal_code)
        .finish()
}
