//! Return Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    returns::{ReturnRequestsResponse, errors::into_status_error},
    state::State,
};

/// Return Index Handler
///
/// The signed-in customer's return requests, newest first.
#[endpoint(
    tags("returns"),
    summary = "List Returns",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReturnRequestsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let returns = state
        .app
        .returns
        .list_returns(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(returns.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::returns::{MockReturnsService, records::ReturnRequestUuid};

    use crate::{
        returns::tests::make_return,
        test_helpers::{TEST_CUSTOMER_UUID, customer_service, strict_app},
    };

    use super::*;

    #[tokio::test]
    async fn test_index_lists_own_returns() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_list_returns()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(|customer| Ok(vec![make_return(ReturnRequestUuid::new(), customer)]));

        let mut app = strict_app();

        app.returns = Arc::new(returns);

        let body: ReturnRequestsResponse = TestClient::get("http://example.com/returns")
            .send(&customer_service(app, Router::with_path("returns").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(body.returns.len(), 1);

        Ok(())
    }
}
