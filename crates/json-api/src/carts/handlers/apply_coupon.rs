//! Apply Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{CartResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Apply Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyCouponRequest {
    /// Case-insensitive coupon code
    pub code: String,
}

/// Apply Coupon Handler
///
/// Attaches a coupon to the cart, replacing any coupon already attached.
#[endpoint(
    tags("carts"),
    summary = "Apply Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon applied"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid coupon code"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Coupon does not apply to this cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(name = "carts.apply_coupon", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<ApplyCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .apply_coupon(customer, json.into_inner().code, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
