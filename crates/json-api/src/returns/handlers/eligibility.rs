//! Return Eligibility Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::returns::records::ReturnEligibility;

use crate::{extensions::*, returns::errors::into_status_error, state::State};

/// Return Eligibility Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnEligibilityResponse {
    pub eligible: bool,

    /// Last calendar day, in store time, a return is accepted
    pub last_day: String,

    /// `order_closed`, `already_requested` or `window_elapsed`
    pub reason: Option<String>,

    pub message: Option<String>,
}

impl From<ReturnEligibility> for ReturnEligibilityResponse {
    fn from(eligibility: ReturnEligibility) -> Self {
        Self {
            eligible: eligibility.is_eligible(),
            last_day: eligibility.last_day.to_string(),
            reason: eligibility
                .ineligibility
                .map(|reason| reason.as_str().to_string()),
            message: eligibility.ineligibility.map(|reason| reason.to_string()),
        }
    }
}

/// Return Eligibility Handler
///
/// Whether a line of one of the customer's orders can still be returned.
#[endpoint(
    tags("returns"),
    summary = "Check Return Eligibility",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Eligibility decided"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or item not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    item: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ReturnEligibilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let eligibility = state
        .app
        .returns
        .check_eligibility(
            customer,
            order.into_inner().into(),
            item.into_inner().into(),
            point_in_time,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(eligibility.into()))
}
