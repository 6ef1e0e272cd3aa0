//! Remove Wishlist Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, wishlist::errors::into_status_error};

/// Remove Wishlist Item Handler
#[endpoint(
    tags("wishlist"),
    summary = "Remove from Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product is not in the wishlist"),
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
        .wishlists
        .remove_item(customer, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
