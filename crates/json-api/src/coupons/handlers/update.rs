//! Update Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    coupons::{CouponResponse, CouponTermsRequest, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Coupon Handler
///
/// Replaces a coupon's terms. Its code and usage count stay as they are.
#[endpoint(
    tags("admin"),
    summary = "Update Coupon",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    json: JsonBody<CouponTermsRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let terms = json.into_inner().into_terms()?;

    let coupon = state
        .app
        .coupons
        .update_coupon(coupon.into_inner().into(), terms)
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}
