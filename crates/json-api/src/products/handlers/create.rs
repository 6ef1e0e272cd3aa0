//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{ProductDetailsRequest, errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub uuid: Uuid,

    pub details: ProductDetailsRequest,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.into(),
            details: request.details.into(),
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("admin"),
    summary = "Create Product",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(request.uuid));

    let product = state
        .app
        .products
        .create_product(request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar::products::ProductSpecifics;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{make_product, open_service, strict_app};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        let mut app = strict_app();

        app.products = Arc::new(products);

        open_service(app, Router::with_path("admin/products").post(handler))
    }

    fn digital_payload(uuid: Uuid) -> serde_json::Value {
        json!({
            "uuid": uuid,
            "details": {
                "name": "Rust Handbook",
                "price": 299_00,
                "category": "Books",
                "specifics": {
                    "kind": "digital",
                    "file_format": "PDF",
                    "download_url": "https://files.example.com/handbook.pdf"
                }
            }
        })
    }

    #[tokio::test]
    async fn test_create_digital_product() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |new| {
                new.uuid == uuid
                    && new.details.price == 299_00
                    && new.details.specifics.download_url()
                        == Some("https://files.example.com/handbook.pdf")
            })
            .return_once(move |new| {
                let mut product = make_product(new.uuid);

                product.specifics = new.details.specifics;

                Ok(product)
            });

        let mut res = TestClient::post("http://example.com/admin/products")
            .json(&digital_payload(uuid.into_uuid()))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(format!("/products/{uuid}").as_str())
        );
        assert!(matches!(body.specifics, ProductSpecifics::Digital { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_kind_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "details": {
                    "name": "Mystery",
                    "price": 100,
                    "category": "Misc",
                    "specifics": { "kind": "subscription" }
                }
            }))
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_product_returns_409() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&digital_payload(Uuid::now_v7()))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_by_storage_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidData));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&digital_payload(Uuid::now_v7()))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
