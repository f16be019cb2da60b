use serde::Serialize;

use crate::types::{Address, LookupResult};

/// Everything a renderer needs for one lookup: the postal code as entered,
/// the query string that was sent and the classified outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupView {
    pub postal_code: String,
    pub query: String,
    pub result: LookupResult,
}

/// Flat, serializable form of a [`LookupView`].
///
/// Exactly one of `address` and `message` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub postal_code: String,
    pub query: String,
    pub outcome: &'static str,
    pub address: Option<Address>,
    pub message: Option<String>,
}

impl LookupView {
    #[must_use]
    pub fn render(&self) -> RenderedView {
        RenderedView {
            postal_code: self.postal_code.clone(),
            query: self.query.clone(),
            outcome: self.result.outcome(),
            address: self.result.address().cloned(),
            message: self.result.display_message(),
        }
    }

    /// Plain-text lines for terminals and logs.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        match &self.result {
            LookupResult::Success(address) => vec![
                format!("zipcode:  {}", address.postal_code),
                format!("address1: {}", address.prefecture),
                format!("address2: {}", address.city),
                format!("address3: {}", address.suburb),
            ],
            other => other.display_message().into_iter().collect(),
        }
    }
}
