//! Returns Repository

use bazaar::returns::ReturnStatus;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{count_to_db, try_get_count, try_get_parsed},
    domain::{
        customers::records::CustomerUuid,
        orders::records::{OrderItemUuid, OrderUuid},
        products::records::ProductUuid,
        returns::records::{ReturnRequestRecord, ReturnRequestUuid},
    },
};

const CREATE_RETURN_REQUEST_SQL: &str = include_str!("sql/create_return_request.sql");
const LIST_LINE_RETURN_STATUSES_SQL: &str = include_str!("sql/list_line_return_statuses.sql");
const LIST_CUSTOMER_RETURNS_SQL: &str = include_str!("sql/list_customer_returns.sql");
const LIST_RETURNS_SQL: &str = include_str!("sql/list_returns.sql");
const UPDATE_RETURN_STATUS_SQL: &str = include_str!("sql/update_return_status.sql");

/// Row values for a new return request.
pub(crate) struct ReturnRequestInsert<'a> {
    pub uuid: ReturnRequestUuid,
    pub order_uuid: OrderUuid,
    pub order_item_uuid: OrderItemUuid,
    pub quantity: u32,
    pub upi_id: &'a str,
    pub reason: &'a str,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReturnsRepository;

impl PgReturnsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        request: ReturnRequestInsert<'_>,
    ) -> Result<ReturnRequestRecord, sqlx::Error> {
        query_as::<Postgres, ReturnRequestRecord>(CREATE_RETURN_REQUEST_SQL)
            .bind(request.uuid.into_uuid())
            .bind(request.order_uuid.into_uuid())
            .bind(request.order_item_uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(count_to_db("quantity", request.quantity)?)
            .bind(request.upi_id)
            .bind(request.reason)
            .bind(ReturnStatus::Pending.as_str())
            .bind(SqlxTimestamp::from(request.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// Statuses of every request already made for a product on an order.
    pub(crate) async fn line_statuses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
    ) -> Result<Vec<ReturnStatus>, sqlx::Error> {
        let statuses: Vec<String> = query_scalar(LIST_LINE_RETURN_STATUSES_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        statuses
            .iter()
            .map(|status| {
                status.parse().map_err(|error| sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: Box::new(error),
                })
            })
            .collect()
    }

    pub(crate) async fn list_customer_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<ReturnRequestRecord>, sqlx::Error> {
        query_as::<Postgres, ReturnRequestRecord>(LIST_CUSTOMER_RETURNS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ReturnRequestRecord>, sqlx::Error> {
        query_as::<Postgres, ReturnRequestRecord>(LIST_RETURNS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: ReturnRequestUuid,
        status: ReturnStatus,
    ) -> Result<ReturnRequestRecord, sqlx::Error> {
        query_as::<Postgres, ReturnRequestRecord>(UPDATE_RETURN_STATUS_SQL)
            .bind(request.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReturnRequestRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReturnRequestUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            order_item_uuid: OrderItemUuid::from_uuid(row.try_get("order_item_uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            upi_id: row.try_get("upi_id")?,
            reason: row.try_get("reason")?,
            status: try_get_parsed(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
