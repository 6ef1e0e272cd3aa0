//! Checkout Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::orders::data::Checkout;

use crate::{
    extensions::*,
    orders::{ContactBody, OrderResponse, ShippingAddressBody, errors::into_status_error},
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub contact: ContactBody,

    /// Required when the cart holds physical or customized products
    #[serde(default)]
    pub shipping_address: Option<ShippingAddressBody>,
}

impl From<CheckoutRequest> for Checkout {
    fn from(request: CheckoutRequest) -> Self {
        Checkout {
            contact: request.contact.into(),
            shipping_address: request.shipping_address.map(Into::into),
        }
    }
}

/// Checkout Handler
///
/// Places an order for everything in the cart and empties it. Carts with a
/// digital product are paid online; the rest are cash on delivery.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing shipping address or bad payload"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty cart or coupon no longer applies"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.checkout",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("customer_uuid", tracing::field::display(customer));

    let order = state
        .app
        .orders
        .checkout(customer, json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(
        grand_total = order.grand_total,
        payment_method = %order.payment_method,
        "placed order"
    );

    Ok(Json(order.into()))
}
