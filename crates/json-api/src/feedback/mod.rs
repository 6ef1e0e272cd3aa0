//! Feedback

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use bazaar_app::domain::feedback::{FeedbackServiceError, records::FeedbackRecord};

pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Feedback Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeedbackResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub message: String,
    pub created_at: String,
}

impl From<FeedbackRecord> for FeedbackResponse {
    fn from(feedback: FeedbackRecord) -> Self {
        Self {
            uuid: feedback.uuid.into_uuid(),
            customer_uuid: feedback.customer_uuid.into_uuid(),
            customer_name: feedback.customer_name,
            customer_email: feedback.customer_email,
            message: feedback.message,
            created_at: feedback.created_at.to_string(),
        }
    }
}

pub(crate) fn into_status_error(error: FeedbackServiceError) -> StatusError {
    match error {
        error @ FeedbackServiceError::InvalidMessage { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        FeedbackServiceError::InvalidReference | FeedbackServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid feedback")
        }
        FeedbackServiceError::Sql(source) => {
            error!("feedback storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
