//! Database connection management

use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_scalar};

use crate::domain::customers::records::CustomerUuid;

/// SQL used to set customer context for row-level security.
pub const SET_CUSTOMER_CONTEXT_SQL: &str =
    "SELECT set_config('app.current_customer_uuid', $1, true)";

const ROLE_BYPASSES_RLS_SQL: &str =
    "SELECT rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction for tables without row-level security.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction and set customer context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting customer context fails.
    pub async fn begin_customer_transaction(
        &self,
        customer: CustomerUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_CUSTOMER_CONTEXT_SQL)
            .bind(customer.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Whether the connected role ignores row-level security.
///
/// # Errors
///
/// Returns an error if the role lookup fails.
pub async fn role_bypasses_rls(pool: &PgPool) -> Result<bool, sqlx::Error> {
    query_scalar(ROLE_BYPASSES_RLS_SQL).fetch_one(pool).await
}

/// Convert a minor-unit amount for binding to a `BIGINT` column.
pub(crate) fn amount_to_db(column: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

/// Convert a count for binding to an `INTEGER` column.
pub(crate) fn count_to_db(column: &str, count: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

/// Read a non-negative `BIGINT` amount column.
pub(crate) fn try_get_amount(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let amount: i64 = row.try_get(column)?;

    u64::try_from(amount).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

/// Read a nullable non-negative `BIGINT` amount column.
pub(crate) fn try_get_optional_amount(
    row: &PgRow,
    column: &str,
) -> Result<Option<u64>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(column)?
        .map(|amount| {
            u64::try_from(amount).map_err(|error| sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(error),
            })
        })
        .transpose()
}

/// Read a non-negative `INTEGER` count column.
pub(crate) fn try_get_count(row: &PgRow, column: &str) -> Result<u32, sqlx::Error> {
    let count: i32 = row.try_get(column)?;

    u32::try_from(count).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

/// Read a text column holding one of a known set of names.
pub(crate) fn try_get_parsed<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}
