//! Wishlists Repository

use bazaar::products::Customization;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::{
    database::try_get_amount,
    domain::{
        customers::records::CustomerUuid, products::records::ProductUuid,
        wishlists::records::WishlistItemRecord,
    },
};

const LIST_WISHLIST_ITEMS_SQL: &str = include_str!("sql/list_wishlist_items.sql");
const ADD_WISHLIST_ITEM_SQL: &str = include_str!("sql/add_wishlist_item.sql");
const REMOVE_WISHLIST_ITEM_SQL: &str = include_str!("sql/remove_wishlist_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistsRepository;

impl PgWishlistsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<WishlistItemRecord>, sqlx::Error> {
        query_as::<Postgres, WishlistItemRecord>(LIST_WISHLIST_ITEMS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Returns `false` when the product was already on the list.
    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
        display_image: &str,
        customization: Option<&Customization>,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(ADD_WISHLIST_ITEM_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .bind(display_image)
            .bind(customization.map(Json))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    pub(crate) async fn remove_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_WISHLIST_ITEM_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            display_image: row.try_get("display_image")?,
            customization: row
                .try_get::<Option<Json<Customization>>, _>("customization")?
                .map(|customization| customization.0),
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}
