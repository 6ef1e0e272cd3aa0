//! Remove Cart Item Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{CartResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .remove_item(customer, item.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar::pricing::CouponOutcome;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::carts::{CartsServiceError, MockCartsService, records::CartItemUuid};

    use crate::{
        carts::tests::priced,
        test_helpers::{TEST_CUSTOMER_UUID, customer_service, strict_app},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let mut app = strict_app();

        app.carts = Arc::new(carts);

        customer_service(app, Router::with_path("cart/items/{item}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_item_returns_remaining_cart() -> TestResult {
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |customer, requested, _| *customer == TEST_CUSTOMER_UUID && *requested == item)
            .return_once(|_, _, _| Ok(priced(vec![], 0, CouponOutcome::NoCoupon)));

        let body: CartResponse = TestClient::delete(format!("http://example.com/cart/items/{item}"))
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body.item_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_item_in_another_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/cart/items/{}", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
