//! Coupons Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{amount_to_db, count_to_db, try_get_amount, try_get_count},
    domain::coupons::{
        data::CouponTerms,
        records::{CouponRecord, CouponUuid},
    },
};

const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const GET_COUPON_SQL: &str = include_str!("sql/get_coupon.sql");
const FIND_COUPON_BY_CODE_SQL: &str = include_str!("sql/find_coupon_by_code.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/update_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/delete_coupon.sql");
const REDEEM_COUPON_SQL: &str = include_str!("sql/redeem_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LIST_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_COUPON_SQL)
            .bind(coupon.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(FIND_COUPON_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        code: &str,
        terms: &CouponTerms,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(code)
            .bind(i16::from(terms.percent_off))
            .bind(terms.active)
            .bind(amount_to_db("minimum_spend", terms.minimum_spend)?)
            .bind(SqlxDate::from(terms.valid_till))
            .bind(
                terms
                    .max_uses
                    .map(|max_uses| count_to_db("max_uses", max_uses))
                    .transpose()?,
            )
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        terms: &CouponTerms,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(UPDATE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(i16::from(terms.percent_off))
            .bind(terms.active)
            .bind(amount_to_db("minimum_spend", terms.minimum_spend)?)
            .bind(SqlxDate::from(terms.valid_till))
            .bind(
                terms
                    .max_uses
                    .map(|max_uses| count_to_db("max_uses", max_uses))
                    .transpose()?,
            )
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Count one use. Returns `false` when the coupon is inactive or used up.
    pub(crate) async fn redeem_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(REDEEM_COUPON_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let percent_off: i16 = row.try_get("percent_off")?;

        let percent_off = u8::try_from(percent_off).map_err(|e| sqlx::Error::ColumnDecode {
            index: "percent_off".to_string(),
            source: Box::new(e),
        })?;

        let max_uses = row
            .try_get::<Option<i32>, _>("max_uses")?
            .map(|max_uses| {
                u32::try_from(max_uses).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "max_uses".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            percent_off,
            active: row.try_get("active")?,
            minimum_spend: try_get_amount(row, "minimum_spend")?,
            valid_till: row.try_get::<SqlxDate, _>("valid_till")?.to_jiff(),
            max_uses,
            times_used: try_get_count(row, "times_used")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
