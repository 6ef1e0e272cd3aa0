//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching products, ordered by name
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Browses the catalog, optionally narrowed to a category or a search term.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner(),
        search: search.into_inner(),
    };

    let products = state
        .app
        .products
        .list_products(filter.normalized())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{make_product, open_service, strict_app};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        let mut app = strict_app();

        app.products = Arc::new(products);

        open_service(app, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_without_filters_lists_catalog() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::default())
            .return_once(|_| Ok(vec![make_product(ProductUuid::new())]));

        let body: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(body.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_passes_trimmed_filters() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| {
                filter.category.as_deref() == Some("Apparel")
                    && filter.search.as_deref() == Some("tee")
            })
            .return_once(|_| Ok(vec![]));

        let body: ProductsResponse =
            TestClient::get("http://example.com/products?category=Apparel&search=%20tee%20")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert!(body.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| filter.search.is_none())
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?search=%20%20")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
