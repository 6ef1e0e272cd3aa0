//! Carts Repository

use bazaar::products::Customization;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::{
    database::{count_to_db, try_get_amount, try_get_count, try_get_parsed},
    domain::{
        carts::records::{CartItemRecord, CartItemUuid},
        coupons::records::{CouponRecord, CouponUuid},
        customers::records::CustomerUuid,
        products::records::ProductUuid,
    },
};

const LIST_CART_ITEMS_SQL: &str = include_str!("sql/list_cart_items.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("sql/create_cart_item.sql");
const INCREMENT_CART_ITEM_SQL: &str = include_str!("sql/increment_cart_item.sql");
const SET_CART_ITEM_QUANTITY_SQL: &str = include_str!("sql/set_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("sql/clear_cart_items.sql");
const GET_CART_COUPON_SQL: &str = include_str!("sql/get_cart_coupon.sql");
const SET_CART_COUPON_SQL: &str = include_str!("sql/set_cart_coupon.sql");

/// Row values for a new cart line.
pub(crate) struct CartItemInsert<'a> {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub customization: Option<&'a Customization>,
    pub display_image: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemInsert<'_>,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(count_to_db("quantity", item.quantity)?)
            .bind(item.customization.map(Json))
            .bind(item.display_image)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn increment_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemUuid,
        by: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(customer.into_uuid())
            .bind(count_to_db("quantity", by)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(customer.into_uuid())
            .bind(count_to_db("quantity", quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_CART_COUPON_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Attach a coupon to the customer's cart, or detach it with `None`.
    pub(crate) async fn set_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        coupon: Option<CouponUuid>,
    ) -> Result<(), sqlx::Error> {
        query(SET_CART_COUPON_SQL)
            .bind(customer.into_uuid())
            .bind(coupon.map(CouponUuid::into_uuid))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_kind: try_get_parsed(row, "product_kind")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_count(row, "quantity")?,
            customization: row
                .try_get::<Option<Json<Customization>>, _>("customization")?
                .map(|customization| customization.0),
            display_image: row.try_get("display_image")?,
            download_url: row.try_get("download_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
