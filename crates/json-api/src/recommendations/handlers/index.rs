//! Recommendations Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{error, warn};

use bazaar_app::domain::recommendations::RecommendationsServiceError;

use crate::{extensions::*, products::index::ProductsResponse, state::State};

fn into_status_error(error: RecommendationsServiceError) -> StatusError {
    match error {
        RecommendationsServiceError::Generator(source) => {
            warn!("recommendation generator failed: {source}");

            StatusError::bad_gateway().brief("Recommendations are unavailable right now")
        }
        RecommendationsServiceError::Sql(source) => {
            error!("failed to load recommendations: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Recommendations Handler
///
/// Suggests catalog products based on what the customer viewed recently.
/// Customers with no history get an empty list.
#[endpoint(
    tags("products"),
    summary = "Recommended Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Recommended products"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Recommendation provider failed"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let products = state
        .app
        .recommendations
        .recommend(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
