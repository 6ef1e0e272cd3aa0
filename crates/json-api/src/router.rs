//! App Router

use salvo::Router;

use crate::{
    auth, carts, coupons, customers, feedback, gifts, history, images, orders, product_requests,
    products, recommendations, returns, wishlist,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(customer_router())
        .push(admin_router())
}

/// Browsing and signing in.
fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("sign-up").post(auth::sign_up::handler))
                .push(Router::with_path("sign-in").post(auth::sign_in::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

/// Everything behind a customer bearer token.
fn customer_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("auth/sign-out").post(auth::sign_out::handler))
        .push(Router::with_path("me").get(customers::me::handler))
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("coupon")
                        .put(carts::apply_coupon::handler)
                        .delete(carts::remove_coupon::handler),
                )
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("wishlist")
                .get(wishlist::index::handler)
                .post(wishlist::create::handler)
                .push(Router::with_path("{product}").delete(wishlist::delete::handler)),
        )
        .push(
            Router::with_path("history")
                .get(history::index::handler)
                .push(Router::with_path("{product}").post(history::create::handler)),
        )
        .push(Router::with_path("recommendations").get(recommendations::index::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::checkout::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("payment").post(orders::payment::handler))
                        .push(
                            Router::with_path("items/{item}/return-eligibility")
                                .get(returns::eligibility::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("returns")
                .get(returns::index::handler)
                .post(returns::create::handler),
        )
        .push(Router::with_path("feedback").post(feedback::create::handler))
        .push(
            Router::with_path("product-requests")
                .get(product_requests::index::handler)
                .post(product_requests::create::handler),
        )
        .push(
            Router::with_path("gifts")
                .push(Router::with_path("progress").get(gifts::progress::handler))
                .push(Router::with_path("claim").post(gifts::claim::handler)),
        )
}

/// Back-office, behind Basic credentials.
fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::admin::handler)
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(Router::with_path("images").post(images::upload::handler))
        .push(
            Router::with_path("coupons")
                .get(coupons::index::handler)
                .post(coupons::create::handler)
                .push(
                    Router::with_path("{coupon}")
                        .get(coupons::get::handler)
                        .put(coupons::update::handler)
                        .delete(coupons::delete::handler),
                ),
        )
        .push(Router::with_path("customers").get(customers::index::handler))
        .push(
            Router::with_path("orders")
                .get(orders::admin_index::handler)
                .push(Router::with_path("{order}/status").put(orders::set_status::handler)),
        )
        .push(
            Router::with_path("returns")
                .get(returns::admin_index::handler)
                .push(Router::with_path("{request}/status").put(returns::set_status::handler)),
        )
        .push(Router::with_path("feedback").get(feedback::index::handler))
        .push(
            Router::with_path("product-requests")
                .get(product_requests::admin_index::handler)
                .push(
                    Router::with_path("{request}/status")
                        .put(product_requests::set_status::handler),
                ),
        )
        .push(Router::with_path("gift-claims").get(gifts::claims::handler))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::TestClient,
    };
    use testresult::TestResult;

    use crate::test_helpers::{state, strict_app};

    use super::*;

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state(strict_app())))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_customer_routes_require_a_bearer_token() -> TestResult {
        let service = make_service();

        for path in ["cart", "orders", "wishlist", "gifts/progress", "me"] {
            let res = TestClient::get(format!("http://example.com/{path}"))
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "GET /{path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_reject_wrong_credentials() -> TestResult {
        let res = TestClient::get("http://example.com/admin/orders")
            .add_header(AUTHORIZATION, "Basic YWRtaW46d3Jvbmc=", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
