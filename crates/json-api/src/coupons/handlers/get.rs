//! Get Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    coupons::{CouponResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Get Coupon Handler
#[endpoint(
    tags("admin"),
    summary = "Get Coupon",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon found"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .get_coupon(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::TestClient;
    use testresult::TestResult;

    use bazaar_app::domain::coupons::{CouponsServiceError, MockCouponsService};

    use crate::test_helpers::{open_service, strict_app};

    use super::*;

    #[tokio::test]
    async fn test_unknown_coupon_returns_404() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_get_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let mut app = strict_app();

        app.coupons = Arc::new(coupons);

        let res = TestClient::get(format!("http://example.com/admin/coupons/{}", Uuid::now_v7()))
            .send(&open_service(app, Router::with_path("admin/coupons/{coupon}").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
