//! Feedback Records

use jiff::Timestamp;

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

/// Feedback UUID
pub type FeedbackUuid = TypedUuid<FeedbackRecord>;

/// Feedback Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub uuid: FeedbackUuid,
    pub customer_uuid: CustomerUuid,
    pub customer_name: String,
    pub customer_email: String,
    pub message: String,
    pub created_at: Timestamp,
}
