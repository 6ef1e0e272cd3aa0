//! Set Order Status Handler

use std::sync::Arc;

use bazaar::orders::OrderStatus;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Set Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetOrderStatusRequest {
    /// Display name of the status, e.g. `Shipped`
    pub status: String,
}

/// Set Order Status Handler
#[endpoint(
    tags("admin"),
    summary = "Set Order Status",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
#[tracing::instrument(name = "orders.set_status", skip(order, json, depot), err)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<SetOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("unknown order status")?;

    let order = state
        .app
        .orders
        .set_status(order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order.uuid, %status, "changed order status");

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::{
        customers::records::CustomerUuid,
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
    };

    use crate::{
        orders::tests::make_order,
        test_helpers::{open_service, strict_app},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        let mut app = strict_app();

        app.orders = Arc::new(orders);

        open_service(app, Router::with_path("admin/orders/{order}/status").put(handler))
    }

    #[tokio::test]
    async fn test_set_status_accepts_display_names() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_set_status()
            .once()
            .withf(move |requested, status| *requested == uuid && *status == OrderStatus::Shipped)
            .return_once(move |_, status| {
                let mut order = make_order(uuid, CustomerUuid::new());

                order.status = status;

                Ok(order)
            });

        let body: OrderResponse =
            TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
                .json(&json!({ "status": "Shipped" }))
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(body.status, "Shipped");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let res = TestClient::put(format!("http://example.com/admin/orders/{}/status", Uuid::now_v7()))
            .json(&json!({ "status": "Teleported" }))
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_set_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/admin/orders/{}/status", Uuid::now_v7()))
            .json(&json!({ "status": "Cancelled" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
