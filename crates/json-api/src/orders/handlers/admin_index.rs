//! All Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
    state::State,
};

/// All Orders Handler
///
/// Every order in the store, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("basic_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_all_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{
        customers::records::CustomerUuid,
        orders::{MockOrdersService, records::OrderUuid},
    };

    use crate::{
        orders::tests::make_order,
        test_helpers::{open_service, strict_app},
    };

    use super::*;

    #[tokio::test]
    async fn test_admin_sees_every_customers_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_all_orders().once().return_once(|| {
            Ok(vec![
                make_order(OrderUuid::new(), CustomerUuid::new()),
                make_order(OrderUuid::new(), CustomerUuid::new()),
            ])
        });

        let mut app = strict_app();

        app.orders = Arc::new(orders);

        let body: OrdersResponse = TestClient::get("http://example.com/admin/orders")
            .send(&open_service(app, Router::with_path("admin/orders").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(body.orders.len(), 2);

        Ok(())
    }
}
