//! File Return Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::returns::data::NewReturnRequest;

use crate::{
    extensions::*,
    returns::{ReturnRequestResponse, errors::into_status_error},
    state::State,
};

/// File Return Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FileReturnRequest {
    pub order_uuid: Uuid,
    pub order_item_uuid: Uuid,

    /// Units to send back, at most the quantity ordered
    pub quantity: u32,

    /// Refund destination, e.g. `name@bank`
    pub upi_id: String,

    pub reason: String,
}

impl From<FileReturnRequest> for NewReturnRequest {
    fn from(request: FileReturnRequest) -> Self {
        NewReturnRequest {
            order_uuid: request.order_uuid.into(),
            order_item_uuid: request.order_item_uuid.into(),
            quantity: request.quantity,
            upi_id: request.upi_id,
            reason: request.reason,
        }
    }
}

/// File Return Handler
///
/// Requests a refund for a line of a recent order.
#[endpoint(
    tags("returns"),
    summary = "Request Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Return requested"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or refund details"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or item not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Item is not eligible for return"),
    ),
)]
#[tracing::instrument(
    name = "returns.create",
    skip(json, depot, res),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<FileReturnRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReturnRequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let request = json.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(request.order_uuid));

    let filed = state
        .app
        .returns
        .file_return(customer, request.into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(return_uuid = %filed.uuid, "filed return request");

    Ok(Json(filed.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar::{
        orders::OrderStatus,
        returns::{Ineligibility, RefundDetailsError},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::returns::{
        MockReturnsService, ReturnsServiceError, records::ReturnRequestUuid,
    };

    use crate::{
        returns::tests::make_return,
        test_helpers::{customer_service, strict_app},
    };

    use super::*;

    fn make_service(returns: MockReturnsService) -> Service {
        let mut app = strict_app();

        app.returns = Arc::new(returns);

        customer_service(app, Router::with_path("returns").post(handler))
    }

    fn payload() -> serde_json::Value {
        json!({
            "order_uuid": Uuid::now_v7(),
            "order_item_uuid": Uuid::now_v7(),
            "quantity": 1,
            "upi_id": "asha@okbank",
            "reason": "Too small around the shoulders"
        })
    }

    #[tokio::test]
    async fn test_file_return_returns_201() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_file_return()
            .once()
            .withf(|_, request, _| request.upi_id == "asha@okbank" && request.quantity == 1)
            .return_once(|customer, _, _| Ok(make_return(ReturnRequestUuid::new(), customer)));

        let mut res = TestClient::post("http://example.com/returns")
            .json(&payload())
            .send(&make_service(returns))
            .await;

        let body: ReturnRequestResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.status, "Pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_order_returns_422() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns.expect_file_return().once().return_once(|_, _, _| {
            Err(ReturnsServiceError::Ineligible(Ineligibility::OrderClosed(
                OrderStatus::Cancelled,
            )))
        });

        let res = TestClient::post("http://example.com/returns")
            .json(&payload())
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_upi_id_returns_400() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns.expect_file_return().once().return_once(|_, _, _| {
            Err(ReturnsServiceError::InvalidRefundDetails(
                RefundDetailsError::InvalidUpiId,
            ))
        });

        let res = TestClient::post("http://example.com/returns")
            .json(&payload())
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_too_many_units_returns_400() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_file_return()
            .once()
            .return_once(|_, _, _| Err(ReturnsServiceError::InvalidQuantity { ordered: 1 }));

        let res = TestClient::post("http://example.com/returns")
            .json(&payload())
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
