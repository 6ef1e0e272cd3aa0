//! Wishlist Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    wishlist::{WishlistItemResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    /// Saved products, newest first
    pub items: Vec<WishlistItemResponse>,
}

/// Wishlist Index Handler
#[endpoint(
    tags("wishlist"),
    summary = "List Wishlist",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let items = state
        .app
        .wishlists
        .list_items(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(WishlistResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{
        products::records::ProductUuid,
        wishlists::{MockWishlistsService, records::WishlistItemRecord},
    };

    use crate::test_helpers::{TEST_CUSTOMER_UUID, customer_service, strict_app};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_saved_products() -> TestResult {
        let product = ProductUuid::new();

        let mut wishlists = MockWishlistsService::new();

        wishlists
            .expect_list_items()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(move |_| {
                Ok(vec![WishlistItemRecord {
                    product_uuid: product,
                    product_name: "Classic Tee".to_string(),
                    unit_price: 499_00,
                    display_image: "https://cdn.example.com/tee.png".to_string(),
                    customization: None,
                    added_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let mut app = strict_app();

        app.wishlists = Arc::new(wishlists);

        let body: WishlistResponse = TestClient::get("http://example.com/wishlist")
            .send(&customer_service(app, Router::with_path("wishlist").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items[0].product_uuid, product.into_uuid());

        Ok(())
    }
}
