//! Submit Feedback Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    feedback::{FeedbackResponse, into_status_error},
    state::State,
};

/// Submit Feedback Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmitFeedbackRequest {
    pub message: String,
}

/// Submit Feedback Handler
#[endpoint(
    tags("feedback"),
    summary = "Send Feedback",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Feedback recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Message too short or too long"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SubmitFeedbackRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<FeedbackResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let feedback = state
        .app
        .feedback
        .submit(customer, json.into_inner().message, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(feedback.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::feedback::{
        FeedbackServiceError, MockFeedbackService,
        records::{FeedbackRecord, FeedbackUuid},
    };

    use crate::test_helpers::{TEST_CUSTOMER_UUID, customer_service, strict_app};

    use super::*;

    fn make_service(feedback: MockFeedbackService) -> Service {
        let mut app = strict_app();

        app.feedback = Arc::new(feedback);

        customer_service(app, Router::with_path("feedback").post(handler))
    }

    #[tokio::test]
    async fn test_submit_feedback_returns_201() -> TestResult {
        let mut feedback = MockFeedbackService::new();

        feedback
            .expect_submit()
            .once()
            .withf(|customer, message, _| {
                *customer == TEST_CUSTOMER_UUID && message == "Loved the packaging!"
            })
            .return_once(|customer, message, created_at| {
                Ok(FeedbackRecord {
                    uuid: FeedbackUuid::new(),
                    customer_uuid: customer,
                    customer_name: "Asha".to_string(),
                    customer_email: "asha@example.com".to_string(),
                    message,
                    created_at,
                })
            });

        let mut res = TestClient::post("http://example.com/feedback")
            .json(&json!({ "message": "Loved the packaging!" }))
            .send(&make_service(feedback))
            .await;

        let body: FeedbackResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.customer_name, "Asha");

        Ok(())
    }

    #[tokio::test]
    async fn test_short_message_returns_400() -> TestResult {
        let mut feedback = MockFeedbackService::new();

        feedback
            .expect_submit()
            .once()
            .return_once(|_, _, _| Err(FeedbackServiceError::InvalidMessage { min: 10, max: 1000 }));

        let res = TestClient::post("http://example.com/feedback")
            .json(&json!({ "message": "ok" }))
            .send(&make_service(feedback))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
