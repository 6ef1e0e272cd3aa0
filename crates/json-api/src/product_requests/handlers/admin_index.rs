//! All Product Requests Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    product_requests::{ProductRequestsResponse, errors::into_status_error},
    state::State,
};

#[endpoint(
    tags("admin"),
    summary = "List Product Requests",
    security(("basic_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ProductRequestsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let requests = state
        .app
        .product_requests
        .list_all()
        .await
        .map_err(into_status_error)?;

    Ok(Json(requests.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::TestClient;
    use testresult::TestResult;

    use bazaar_app::domain::product_requests::{
        MockProductRequestsService, ProductRequestsServiceError,
    };

    use crate::test_helpers::{open_service, strict_app};

    use super::*;

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut requests = MockProductRequestsService::new();

        requests
            .expect_list_all()
            .once()
            .return_once(|| Err(ProductRequestsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut app = strict_app();

        app.product_requests = Arc::new(requests);

        let res = TestClient::get("http://example.com/admin/product-requests")
            .send(&open_service(app, Router::with_path("admin/product-requests").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
