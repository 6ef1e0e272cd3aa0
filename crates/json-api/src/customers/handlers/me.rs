//! Current Customer Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    customers::{CustomerResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Current Customer Handler
///
/// Returns the profile of the signed-in customer.
#[endpoint(
    tags("customers"),
    summary = "Current Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let record = state
        .app
        .customers
        .get_customer(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}
