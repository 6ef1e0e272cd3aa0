//! Record View Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, history::into_status_error, state::State};

/// Record View Handler
///
/// Notes that the signed-in customer opened a product page.
#[endpoint(
    tags("history"),
    summary = "Record Product View",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "View recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    state
        .app
        .history
        .record_view(customer, product.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
