//! Feedback service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        feedback::{
            errors::FeedbackServiceError,
            records::{FeedbackRecord, FeedbackUuid},
            repository::PgFeedbackRepository,
        },
    },
};

/// Shortest accepted message, after trimming.
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Longest accepted message, after trimming.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

fn validate_message(message: &str) -> Result<&str, FeedbackServiceError> {
    let message = message.trim();

    if (MIN_MESSAGE_LENGTH..=MAX_MESSAGE_LENGTH).contains(&message.chars().count()) {
        Ok(message)
    } else {
        Err(FeedbackServiceError::InvalidMessage {
            min: MIN_MESSAGE_LENGTH,
            max: MAX_MESSAGE_LENGTH,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgFeedbackService {
    db: Db,
    repository: PgFeedbackRepository,
}

impl PgFeedbackService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFeedbackRepository::new(),
        }
    }
}

#[async_trait]
impl FeedbackService for PgFeedbackService {
    #[tracing::instrument(
        name = "feedback.service.submit",
        skip(self, message, point_in_time),
        fields(customer_uuid = %customer),
        err
    )]
    async fn submit(
        &self,
        customer: CustomerUuid,
        message: String,
        point_in_time: Timestamp,
    ) -> Result<FeedbackRecord, FeedbackServiceError> {
        let message = validate_message(&message)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_feedback(&mut tx, FeedbackUuid::new(), customer, message, point_in_time)
            .await?;

        tx.commit().await?;

        info!(feedback_uuid = %created.uuid, "received feedback");

        Ok(created)
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackRecord>, FeedbackServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let feedback = self.repository.list_feedback(&mut tx).await?;

        tx.commit().await?;

        Ok(feedback)
    }
}

#[automock]
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Record a customer's message.
    async fn submit(
        &self,
        customer: CustomerUuid,
        message: String,
        point_in_time: Timestamp,
    ) -> Result<FeedbackRecord, FeedbackServiceError>;

    /// All feedback, newest first.
    async fn list_feedback(&self) -> Result<Vec<FeedbackRecord>, FeedbackServiceError>;
}
