//! Gift Progress Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    gifts::{GiftProgressResponse, errors::into_status_error},
    state::State,
};

/// Gift Progress Handler
#[endpoint(
    tags("gifts"),
    summary = "Gift Progress",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<GiftProgressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let progress = state
        .app
        .gifts
        .progress(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(progress.into()))
}
