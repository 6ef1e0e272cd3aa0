//! Feedback Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    customers::records::CustomerUuid,
    feedback::records::{FeedbackRecord, FeedbackUuid},
};

const CREATE_FEEDBACK_SQL: &str = include_str!("sql/create_feedback.sql");
const LIST_FEEDBACK_SQL: &str = include_str!("sql/list_feedback.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFeedbackRepository;

impl PgFeedbackRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_feedback(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: FeedbackUuid,
        customer: CustomerUuid,
        message: &str,
        created_at: Timestamp,
    ) -> Result<FeedbackRecord, sqlx::Error> {
        query_as::<Postgres, FeedbackRecord>(CREATE_FEEDBACK_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(message)
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_feedback(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<FeedbackRecord>, sqlx::Error> {
        query_as::<Postgres, FeedbackRecord>(LIST_FEEDBACK_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for FeedbackRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FeedbackUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            message: row.try_get("message")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
