//! Auth repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::{ApiTokenVersion, models::ActiveApiToken},
    domain::customers::records::CustomerUuid,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");

/// Row values for a newly issued token.
pub(crate) struct ApiTokenInsert {
    pub uuid: Uuid,
    pub customer_uuid: CustomerUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: &ApiTokenInsert,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.customer_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .bind(SqlxTimestamp::from(token.created_at))
            .bind(SqlxTimestamp::from(token.expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_active_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        version: ApiTokenVersion,
        now: Timestamp,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(version.as_i16())
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn touch_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Returns `false` when the token was already revoked.
    pub(crate) async fn revoke_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(REVOKE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version: i16 = row.try_get("version")?;

        Ok(Self {
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            version: ApiTokenVersion::try_from(version).map_err(|error| {
                sqlx::Error::ColumnDecode {
                    index: "version".to_string(),
                    source: Box::new(error),
                }
            })?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}
