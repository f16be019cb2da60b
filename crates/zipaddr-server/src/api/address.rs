use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use zipaddr_lookup::{lookup, LookupRequest, RenderedView};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AddressQuery {
    #[serde(default)]
    pub zipcode: String,
}

/// Looks up `zipcode` upstream and renders whichever outcome came back.
///
/// Upstream and transport failures are part of the rendered view, so this
/// handler always answers 200.
pub(super) async fn show_address(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AddressQuery>,
) -> Json<ApiResponse<RenderedView>> {
    let view = lookup(&state.lookup, LookupRequest::new(query.zipcode)).await;

    Json(ApiResponse {
        data: view.render(),
        meta: ResponseMeta::new(req_id.0),
    })
}
