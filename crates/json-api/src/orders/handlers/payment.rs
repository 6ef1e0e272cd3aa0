//! Confirm Payment Handler

use std::sync::Arc;

use bazaar::orders::PaymentOutcome;
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
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Payment result reported by the payment page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentOutcomeBody {
    Succeeded,
    Failed,
}

impl From<PaymentOutcomeBody> for PaymentOutcome {
    fn from(outcome: PaymentOutcomeBody) -> Self {
        match outcome {
            PaymentOutcomeBody::Succeeded => PaymentOutcome::Succeeded,
            PaymentOutcomeBody::Failed => PaymentOutcome::Failed,
        }
    }
}

/// Confirm Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmPaymentRequest {
    pub outcome: PaymentOutcomeBody,
}

/// Confirm Payment Handler
///
/// Moves an order awaiting online payment to `Paid` or `Payment Failed`.
#[endpoint(
    tags("orders"),
    summary = "Confirm Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is not awaiting payment"),
    ),
)]
#[tracing::instrument(name = "orders.payment", skip(order, json, depot), err)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<ConfirmPaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let order = state
        .app
        .orders
        .confirm_payment(customer, order.into_inner().into(), json.into_inner().outcome.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order.uuid, status = %order.status, "recorded payment");

    Ok(Json(order.into()))
}
