//! Create Coupon Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::coupons::data::NewCoupon;

use crate::{
    coupons::{CouponResponse, CouponTermsRequest, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    pub uuid: Uuid,

    /// Stored upper-cased; at least three characters
    pub code: String,

    pub terms: CouponTermsRequest,
}

/// Create Coupon Handler
#[endpoint(
    tags("admin"),
    summary = "Create Coupon",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(name = "coupons.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let CreateCouponRequest { uuid, code, terms } = json.into_inner();

    let coupon = NewCoupon {
        uuid: uuid.into(),
        code,
        terms: terms.into_terms()?,
    };

    let coupon = state
        .app
        .coupons
        .create_coupon(coupon)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/admin/coupons/{}", coupon.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(code = %coupon.code, percent_off = coupon.percent_off, "created coupon");

    Ok(Json(coupon.into()))
}
