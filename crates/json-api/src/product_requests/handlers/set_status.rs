//! Set Product Request Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::product_requests::records::ProductRequestStatus;

use crate::{
    extensions::*,
    product_requests::{ProductRequestResponse, errors::into_status_error},
    state::State,
};

/// Set Product Request Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetProductRequestStatusRequest {
    pub status: String,
}

/// Set Product Request Status Handler
#[endpoint(
    tags("admin"),
    summary = "Set Product Request Status",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product request not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    request: PathParam<Uuid>,
    json: JsonBody<SetProductRequestStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductRequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<ProductRequestStatus>()
        .or_400("unknown product request status")?;

    let updated = state
        .app
        .product_requests
        .set_status(request.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_request_uuid = %updated.uuid, %status, "changed product request status");

    Ok(Json(updated.into()))
}
