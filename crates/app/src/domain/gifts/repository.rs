//! Gifts Repository

use bazaar::{returns::ReturnStatus, rewards::PurchasedLine};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::{
    database::{amount_to_db, try_get_amount, try_get_count, try_get_parsed},
    domain::{
        customers::records::CustomerUuid,
        gifts::{
            data::GiftClaim,
            records::{GiftClaimRecord, GiftClaimUuid},
        },
        orders::records::ShippingAddress,
    },
};

const LIST_PURCHASED_LINES_SQL: &str = include_str!("sql/list_purchased_lines.sql");
const FIND_GIFT_CLAIM_SQL: &str = include_str!("sql/find_gift_claim.sql");
const CREATE_GIFT_CLAIM_SQL: &str = include_str!("sql/create_gift_claim.sql");
const LIST_GIFT_CLAIMS_SQL: &str = include_str!("sql/list_gift_claims.sql");

struct PurchasedLineRow(PurchasedLine);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGiftsRepository;

impl PgGiftsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Every order line the customer has bought, with its latest return status.
    pub(crate) async fn list_purchased_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<PurchasedLine>, sqlx::Error> {
        let rows = query_as::<Postgres, PurchasedLineRow>(LIST_PURCHASED_LINES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    pub(crate) async fn find_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<GiftClaimRecord>, sqlx::Error> {
        query_as::<Postgres, GiftClaimRecord>(FIND_GIFT_CLAIM_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        claim: &GiftClaim,
        kept_products: u64,
        created_at: Timestamp,
    ) -> Result<GiftClaimRecord, sqlx::Error> {
        query_as::<Postgres, GiftClaimRecord>(CREATE_GIFT_CLAIM_SQL)
            .bind(GiftClaimUuid::new().into_uuid())
            .bind(customer.into_uuid())
            .bind(&claim.recipient_name)
            .bind(&claim.phone)
            .bind(Json(&claim.shipping_address))
            .bind(amount_to_db("kept_products", kept_products)?)
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_claims(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<GiftClaimRecord>, sqlx::Error> {
        query_as::<Postgres, GiftClaimRecord>(LIST_GIFT_CLAIMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PurchasedLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let return_status = row
            .try_get::<Option<String>, _>("return_status")?
            .map(|status| {
                status
                    .parse::<ReturnStatus>()
                    .map_err(|error| sqlx::Error::ColumnDecode {
                        index: "return_status".to_string(),
                        source: Box::new(error),
                    })
            })
            .transpose()?;

        Ok(Self(PurchasedLine {
            order_status: try_get_parsed(row, "order_status")?,
            quantity: try_get_count(row, "quantity")?,
            return_status,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for GiftClaimRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: GiftClaimUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            recipient_name: row.try_get("recipient_name")?,
            phone: row.try_get("phone")?,
            shipping_address: row
                .try_get::<Json<ShippingAddress>, _>("shipping_address")?
                .0,
            kept_products: try_get_amount(row, "kept_products")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
