//! Claim Gift Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::gifts::data::GiftClaim;

use crate::{
    extensions::*,
    gifts::{GiftClaimResponse, errors::into_status_error},
    orders::ShippingAddressBody,
    state::State,
};

/// Claim Gift Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClaimGiftRequest {
    pub recipient_name: String,
    pub phone: String,
    pub shipping_address: ShippingAddressBody,
}

impl From<ClaimGiftRequest> for GiftClaim {
    fn from(request: ClaimGiftRequest) -> Self {
        GiftClaim {
            recipient_name: request.recipient_name,
            phone: request.phone,
            shipping_address: request.shipping_address.into(),
        }
    }
}

/// Claim Gift Handler
#[endpoint(
    tags("gifts"),
    summary = "Claim Free Gift",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Gift claimed"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Not enough kept products"),
        (status_code = StatusCode::CONFLICT, description = "Gift already claimed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ClaimGiftRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<GiftClaimResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let claim = state
        .app
        .gifts
        .claim(customer, json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    tracing::info!(gift_claim_uuid = %claim.uuid, kept = claim.kept_products, "claimed gift");

    res.status_code(StatusCode::CREATED);

    Ok(Json(claim.into()))
}
