//! Feedback Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    feedback::{FeedbackResponse, into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeedbackListResponse {
    /// Newest first
    pub feedback: Vec<FeedbackResponse>,
}

/// Feedback Index Handler
#[endpoint(
    tags("admin"),
    summary = "List Feedback",
    security(("basic_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FeedbackListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let feedback = state
        .app
        .feedback
        .list_feedback()
        .await
        .map_err(into_status_error)?;

    Ok(Json(FeedbackListResponse {
        feedback: feedback.into_iter().map(Into::into).collect(),
    }))
}
