//! Browsing History Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    customers::records::CustomerUuid, history::records::ViewRecord,
    products::records::ProductUuid,
};

const RECORD_VIEW_SQL: &str = include_str!("sql/record_view.sql");
const LIST_RECENT_VIEWS_SQL: &str = include_str!("sql/list_recent_views.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgHistoryRepository;

impl PgHistoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn record_view(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
        product_name: &str,
        viewed_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(RECORD_VIEW_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .bind(product_name)
            .bind(SqlxTimestamp::from(viewed_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_recent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        limit: i64,
    ) -> Result<Vec<ViewRecord>, sqlx::Error> {
        query_as::<Postgres, ViewRecord>(LIST_RECENT_VIEWS_SQL)
            .bind(customer.into_uuid())
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ViewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            viewed_at: row.try_get::<SqlxTimestamp, _>("viewed_at")?.to_jiff(),
        })
    }
}
