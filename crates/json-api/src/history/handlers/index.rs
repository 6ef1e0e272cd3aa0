//! Recently Viewed Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::history::records::ViewRecord;

use crate::{extensions::*, history::into_status_error, state::State};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ViewResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub viewed_at: String,
}

impl From<ViewRecord> for ViewResponse {
    fn from(view: ViewRecord) -> Self {
        Self {
            product_uuid: view.product_uuid.into_uuid(),
            product_name: view.product_name,
            viewed_at: view.viewed_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HistoryResponse {
    /// Most recent first
    pub views: Vec<ViewResponse>,
}

/// Recently Viewed Handler
#[endpoint(
    tags("history"),
    summary = "Recently Viewed Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<HistoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let limit = limit.into_inner().unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let views = state
        .app
        .history
        .list_recent(customer, limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(HistoryResponse {
        views: views.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{history::MockHistoryService, products::records::ProductUuid};

    use crate::test_helpers::{customer_service, strict_app};

    use super::*;

    fn make_service(history: MockHistoryService) -> Service {
        let mut app = strict_app();

        app.history = Arc::new(history);

        customer_service(app, Router::with_path("history").get(handler))
    }

    #[tokio::test]
    async fn test_default_limit_is_applied() -> TestResult {
        let mut history = MockHistoryService::new();

        history
            .expect_list_recent()
            .once()
            .withf(|_, limit| *limit == DEFAULT_LIMIT)
            .return_once(|_, _| {
                Ok(vec![ViewRecord {
                    product_uuid: ProductUuid::new(),
                    product_name: "Classic Tee".to_string(),
                    viewed_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let body: HistoryResponse = TestClient::get("http://example.com/history")
            .send(&make_service(history))
            .await
            .take_json()
            .await?;

        assert_eq!(body.views.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_limit_is_capped() -> TestResult {
        let mut history = MockHistoryService::new();

        history
            .expect_list_recent()
            .once()
            .withf(|_, limit| *limit == MAX_LIMIT)
            .return_once(|_, _| Ok(vec![]));

        let res = TestClient::get("http://example.com/history?limit=500")
            .send(&make_service(history))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
