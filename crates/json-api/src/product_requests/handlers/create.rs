//! Submit Product Request Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::product_requests::data::NewProductRequest;

use crate::{
    extensions::*,
    product_requests::{ProductRequestResponse, errors::into_status_error},
    state::State,
};

/// Submit Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmitProductRequest {
    pub product_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: Option<String>,

    /// Minor units.
    #[serde(default)]
    pub estimated_price: Option<u64>,

    #[serde(default)]
    pub reference_url: Option<String>,
}

impl From<SubmitProductRequest> for NewProductRequest {
    fn from(request: SubmitProductRequest) -> Self {
        NewProductRequest {
            product_name: request.product_name,
            description: request.description,
            category: request.category,
            estimated_price: request.estimated_price,
            reference_url: request.reference_url,
        }
    }
}

/// Submit Product Request Handler
#[endpoint(
    tags("product-requests"),
    summary = "Request a Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Request recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Required field missing"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SubmitProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductRequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let created = state
        .app
        .product_requests
        .submit(customer, json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::product_requests::{
        MockProductRequestsService, ProductRequestsServiceError,
        records::ProductRequestUuid,
    };

    use crate::{
        product_requests::tests::make_request,
        test_helpers::{TEST_CUSTOMER_UUID, customer_service, strict_app},
    };

    use super::*;

    fn make_service(requests: MockProductRequestsService) -> Service {
        let mut app = strict_app();

        app.product_requests = Arc::new(requests);

        customer_service(app, Router::with_path("product-requests").post(handler))
    }

    #[tokio::test]
    async fn test_submit_returns_201_pending_review() -> TestResult {
        let mut requests = MockProductRequestsService::new();

        requests
            .expect_submit()
            .once()
            .withf(|customer, request, _| {
                *customer == TEST_CUSTOMER_UUID
                    && request.product_name == "Brass Diya Lamp"
                    && request.estimated_price == Some(1_200_00)
            })
            .return_once(|customer, _, _| Ok(make_request(ProductRequestUuid::new(), customer)));

        let mut res = TestClient::post("http://example.com/product-requests")
            .json(&json!({
                "product_name": "Brass Diya Lamp",
                "description": "Hand-beaten, about 15cm tall",
                "estimated_price": 1_200_00,
            }))
            .send(&make_service(requests))
            .await;

        let body: ProductRequestResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.status, "Pending Review");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut requests = MockProductRequestsService::new();

        requests
            .expect_submit()
            .once()
            .return_once(|_, _, _| Err(ProductRequestsServiceError::MissingField("product name")));

        let res = TestClient::post("http://example.com/product-requests")
            .json(&json!({ "product_name": "  " }))
            .send(&make_service(requests))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
