//! All Returns Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    returns::{ReturnRequestsResponse, errors::into_status_error},
    state::State,
};

/// All Returns Handler
#[endpoint(
    tags("admin"),
    summary = "List All Returns",
    security(("basic_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReturnRequestsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let returns = state
        .app
        .returns
        .list_all_returns()
        .await
        .map_err(into_status_error)?;

    Ok(Json(returns.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::TestClient;
    use testresult::TestResult;

    use bazaar_app::domain::returns::{MockReturnsService, ReturnsServiceError};

    use crate::test_helpers::{open_service, strict_app};

    use super::*;

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_list_all_returns()
            .once()
            .return_once(|| Err(ReturnsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut app = strict_app();

        app.returns = Arc::new(returns);

        let res = TestClient::get("http://example.com/admin/returns")
            .send(&open_service(app, Router::with_path("admin/returns").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
