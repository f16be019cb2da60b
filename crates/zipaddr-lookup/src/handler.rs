//! Request-scoped lookup that always produces something renderable.

use crate::client::{AddressClient, LookupConfig};
use crate::encode::encode_query;
use crate::types::{LookupRequest, LookupResult};
use crate::view::LookupView;

/// Runs one lookup for `request` and folds every failure into the result.
///
/// A fresh [`AddressClient`] is built from `config` for each call, so no
/// connection state or mutable data outlives the request.
pub async fn lookup(config: &LookupConfig, request: LookupRequest) -> LookupView {
    let query = encode_query(&request.postal_code);

    let fetched = match AddressClient::new(config) {
        Ok(client) => client.fetch(&request.postal_code).await,
        Err(err) => Err(err),
    };

    let result = fetched.unwrap_or_else(|err| {
        tracing::warn!(
            postal_code = %request.postal_code,
            error = %err,
            "address lookup failed before classification"
        );
        LookupResult::from(&err)
    });

    tracing::info!(
        postal_code = %request.postal_code,
        outcome = result.outcome(),
        "address lookup finished"
    );

    LookupView {
        postal_code: request.postal_code,
        query,
        result,
    }
}
