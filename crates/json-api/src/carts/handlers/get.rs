//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{CartResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the signed-in customer's cart priced at the current catalog prices.
/// Pass `?at=` to price it as of another moment.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Priced cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let cart = state
        .app
        .carts
        .get_cart(customer, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar::{coupons::CouponRejection, pricing::CouponOutcome};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::carts::{MockCartsService, records::CartItemUuid};

    use crate::{
        carts::tests::{make_item, priced},
        test_helpers::{TEST_CUSTOMER_UUID, customer_service, strict_app},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let mut app = strict_app();

        app.carts = Arc::new(carts);

        customer_service(app, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_with_applied_coupon() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|customer, _| *customer == TEST_CUSTOMER_UUID)
            .return_once(|_, _| {
                Ok(priced(
                    vec![make_item(CartItemUuid::new(), 500_00, 2)],
                    100_00,
                    CouponOutcome::Applied {
                        code: "SAVE10".to_string(),
                    },
                ))
            });

        let body: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body.subtotal, 1000_00);
        assert_eq!(body.discount, 100_00);
        assert_eq!(body.grand_total, 900_00);
        assert_eq!(body.item_count, 2);

        let coupon = body.coupon.ok_or("coupon should be present")?;

        assert_eq!(coupon.code, "SAVE10");
        assert!(coupon.applied);

        Ok(())
    }

    #[tokio::test]
    async fn test_coupon_that_stopped_applying_reports_reason() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().once().return_once(|_, _| {
            Ok(priced(
                vec![make_item(CartItemUuid::new(), 200_00, 1)],
                0,
                CouponOutcome::NoLongerApplies {
                    code: "SAVE10".to_string(),
                    reason: CouponRejection::MinimumSpendNotMet {
                        minimum_spend: 500_00,
                    },
                },
            ))
        });

        let body: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        let coupon = body.coupon.ok_or("coupon should be present")?;

        assert!(!coupon.applied);
        assert_eq!(coupon.reason.as_deref(), Some("minimum_spend_not_met"));
        assert_eq!(body.grand_total, 200_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_point_in_time_is_forwarded() -> TestResult {
        let at: Timestamp = "2026-03-01T10:00:00Z".parse()?;

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(move |_, point_in_time| *point_in_time == at)
            .return_once(|_, _| Ok(priced(vec![], 0, CouponOutcome::NoCoupon)));

        let body: CartResponse = TestClient::get("http://example.com/cart?at=2026-03-01T10:00:00Z")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(body.items.is_empty());
        assert!(body.coupon.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_point_in_time_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/cart?at=yesterday")
            .send(&make_service(MockCartsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
