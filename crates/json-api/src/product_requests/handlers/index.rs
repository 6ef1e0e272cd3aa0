//! My Product Requests Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    product_requests::{ProductRequestsResponse, errors::into_status_error},
    state::State,
};

/// My Product Requests Handler
#[endpoint(
    tags("product-requests"),
    summary = "List My Product Requests",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ProductRequestsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let requests = state
        .app
        .product_requests
        .list_mine(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(requests.into()))
}
