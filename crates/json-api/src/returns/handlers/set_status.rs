//! Set Return Status Handler

use std::sync::Arc;

use bazaar::returns::ReturnStatus;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    returns::{ReturnRequestResponse, errors::into_status_error},
    state::State,
};

/// Set Return Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetReturnStatusRequest {
    pub status: String,
}

/// Set Return Status Handler
#[endpoint(
    tags("admin"),
    summary = "Set Return Status",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Return request not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    request: PathParam<Uuid>,
    json: JsonBody<SetReturnStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ReturnRequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<ReturnStatus>()
        .or_400("unknown return status")?;

    let updated = state
        .app
        .returns
        .set_status(request.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(return_uuid = %updated.uuid, %status, "changed return status");

    Ok(Json(updated.into()))
}
