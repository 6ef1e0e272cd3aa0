//! Coupon Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    coupons::{CouponResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    /// Ordered by code
    pub coupons: Vec<CouponResponse>,
}

/// Coupon Index Handler
#[endpoint(
    tags("admin"),
    summary = "List Coupons",
    security(("basic_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponsResponse {
        coupons: coupons.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::coupons::{MockCouponsService, records::CouponUuid};

    use crate::{
        coupons::tests::save10,
        test_helpers::{open_service, strict_app},
    };

    use super::*;

    #[tokio::test]
    async fn test_index_shows_usage() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_list_coupons()
            .once()
            .return_once(|| Ok(vec![save10(CouponUuid::new())]));

        let mut app = strict_app();

        app.coupons = Arc::new(coupons);

        let body: CouponsResponse = TestClient::get("http://example.com/admin/coupons")
            .send(&open_service(app, Router::with_path("admin/coupons").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(body.coupons[0].code, "SAVE10");
        assert_eq!(body.coupons[0].times_used, 4);
        assert_eq!(body.coupons[0].valid_till, "2026-12-31");

        Ok(())
    }
}
