//! Customer Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    customers::{CustomerResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomersResponse {
    pub customers: Vec<CustomerResponse>,
}

/// Customer Index Handler
///
/// Lists every registered customer.
#[endpoint(
    tags("admin"),
    summary = "List Customers",
    security(("basic_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CustomersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customers = state
        .app
        .customers
        .list_customers()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CustomersResponse {
        customers: customers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar_app::domain::customers::{
        CustomersServiceError, MockCustomersService,
        records::{CustomerRecord, CustomerUuid},
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{open_service, strict_app};

    use super::*;

    fn make_service(customers: MockCustomersService) -> Service {
        let mut app = strict_app();

        app.customers = Arc::new(customers);

        open_service(app, Router::with_path("admin/customers").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_customers() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers.expect_list_customers().once().return_once(|| {
            Ok(vec![CustomerRecord {
                uuid: CustomerUuid::new(),
                email: "ravi@example.com".to_string(),
                name: "Ravi".to_string(),
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let body: CustomersResponse = TestClient::get("http://example.com/admin/customers")
            .send(&make_service(customers))
            .await
            .take_json()
            .await?;

        assert_eq!(body.customers.len(), 1);
        assert_eq!(body.customers[0].email, "ravi@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_list_customers()
            .once()
            .return_once(|| Err(CustomersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/admin/customers")
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
