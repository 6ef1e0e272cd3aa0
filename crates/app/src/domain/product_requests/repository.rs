//! Product Requests Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{amount_to_db, try_get_optional_amount, try_get_parsed},
    domain::{
        customers::records::CustomerUuid,
        product_requests::{
            data::NewProductRequest,
            records::{ProductRequestRecord, ProductRequestStatus, ProductRequestUuid},
        },
    },
};

const CREATE_PRODUCT_REQUEST_SQL: &str = include_str!("sql/create_product_request.sql");
const LIST_CUSTOMER_PRODUCT_REQUESTS_SQL: &str =
    include_str!("sql/list_customer_product_requests.sql");
const LIST_PRODUCT_REQUESTS_SQL: &str = include_str!("sql/list_product_requests.sql");
const UPDATE_PRODUCT_REQUEST_STATUS_SQL: &str =
    include_str!("sql/update_product_request_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductRequestsRepository;

impl PgProductRequestsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a request in its initial status. Text fields are expected trimmed.
    pub(crate) async fn create_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ProductRequestUuid,
        customer: CustomerUuid,
        request: &NewProductRequest,
        created_at: Timestamp,
    ) -> Result<ProductRequestRecord, sqlx::Error> {
        query_as::<Postgres, ProductRequestRecord>(CREATE_PRODUCT_REQUEST_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(&request.product_name)
            .bind(&request.description)
            .bind(request.category.as_deref())
            .bind(
                request
                    .estimated_price
                    .map(|price| amount_to_db("estimated_price", price))
                    .transpose()?,
            )
            .bind(request.reference_url.as_deref())
            .bind(ProductRequestStatus::default().as_str())
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<ProductRequestRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRequestRecord>(LIST_CUSTOMER_PRODUCT_REQUESTS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRequestRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRequestRecord>(LIST_PRODUCT_REQUESTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: ProductRequestUuid,
        status: ProductRequestStatus,
    ) -> Result<ProductRequestRecord, sqlx::Error> {
        query_as::<Postgres, ProductRequestRecord>(UPDATE_PRODUCT_REQUEST_STATUS_SQL)
            .bind(request.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRequestRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductRequestUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            product_name: row.try_get("product_name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            estimated_price: try_get_optional_amount(row, "estimated_price")?,
            reference_url: row.try_get("reference_url")?,
            status: try_get_parsed(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
