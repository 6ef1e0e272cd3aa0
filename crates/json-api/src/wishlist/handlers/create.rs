//! Add Wishlist Item Handler

use std::sync::Arc;

use bazaar::products::Customization;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::wishlists::records::NewWishlistItem;

use crate::{extensions::*, state::State, wishlist::errors::into_status_error};

/// Add Wishlist Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddWishlistItemRequest {
    pub product_uuid: Uuid,

    #[serde(default)]
    #[salvo(schema(value_type = Option<Object>))]
    pub customization: Option<Customization>,

    #[serde(default)]
    pub display_image: Option<String>,
}

impl From<AddWishlistItemRequest> for NewWishlistItem {
    fn from(request: AddWishlistItemRequest) -> Self {
        NewWishlistItem {
            product_uuid: request.product_uuid.into(),
            customization: request.customization,
            display_image: request.display_image,
        }
    }
}

/// Add Wishlist Item Handler
///
/// Saves a product for later. Saving the same product twice is harmless.
#[endpoint(
    tags("wishlist"),
    summary = "Add to Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product saved"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddWishlistItemRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    state
        .app
        .wishlists
        .add_item(customer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
