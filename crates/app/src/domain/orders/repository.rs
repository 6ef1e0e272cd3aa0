//! Orders Repository

use bazaar::{orders::OrderStatus, products::Customization};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::{
    database::{amount_to_db, count_to_db, try_get_amount, try_get_count, try_get_parsed},
    domain::{
        customers::records::CustomerUuid,
        orders::records::{
            AppliedCoupon, ContactDetails, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid,
            ShippingAddress,
        },
        products::records::ProductUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("sql/list_customer_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_CUSTOMER_ORDER_SQL: &str = include_str!("sql/get_customer_order.sql");
const LOCK_CUSTOMER_ORDER_SQL: &str = include_str!("sql/lock_customer_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// An order item row tagged with its order.
struct OrderItemRow {
    order_uuid: OrderUuid,
    item: OrderItemRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header. Items are added separately with [`Self::create_item`].
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        let (coupon_code, coupon_percent_off) = match &order.coupon {
            Some(coupon) => (Some(coupon.code.as_str()), Some(i16::from(coupon.percent_off))),
            None => (None, None),
        };

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer_uuid.into_uuid())
            .bind(order.contact.name.trim())
            .bind(order.contact.email.trim())
            .bind(order.contact.phone.trim())
            .bind(order.shipping_address.as_ref().map(Json))
            .bind(amount_to_db("subtotal", order.subtotal)?)
            .bind(amount_to_db("discount", order.discount)?)
            .bind(amount_to_db("grand_total", order.grand_total)?)
            .bind(coupon_code)
            .bind(coupon_percent_off)
            .bind(order.payment_method.as_str())
            .bind(order.status.as_str())
            .bind(SqlxTimestamp::from(order.placed_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: u32,
        item: &OrderItemRecord,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        let row = query_as::<Postgres, OrderItemRow>(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(count_to_db("position", position)?)
            .bind(item.product_uuid.into_uuid())
            .bind(&item.name)
            .bind(item.kind.as_str())
            .bind(amount_to_db("unit_price", item.unit_price)?)
            .bind(count_to_db("quantity", item.quantity)?)
            .bind(item.customization.as_ref().map(Json))
            .bind(&item.display_image)
            .bind(item.download_url.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.item)
    }

    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, orders).await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, orders).await
    }

    pub(crate) async fn get_customer_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(GET_CUSTOMER_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.with_items(tx, order).await
    }

    /// Like [`Self::get_customer_order`], holding a row lock until the transaction ends.
    pub(crate) async fn lock_customer_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(LOCK_CUSTOMER_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.with_items(tx, order).await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        self.with_items(tx, order).await
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut orders = self.attach_items(tx, vec![order]).await?;

        orders.pop().ok_or(sqlx::Error::RowNotFound)
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        for row in rows {
            if let Some(order) = orders.iter_mut().find(|order| order.uuid == row.order_uuid) {
                order.items.push(row.item);
            }
        }

        Ok(orders)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let coupon_code: Option<String> = row.try_get("coupon_code")?;
        let coupon_percent_off: Option<i16> = row.try_get("coupon_percent_off")?;

        let coupon = match (coupon_code, coupon_percent_off) {
            (Some(code), Some(percent_off)) => Some(AppliedCoupon {
                code,
                percent_off: u8::try_from(percent_off).map_err(|e| {
                    sqlx::Error::ColumnDecode {
                        index: "coupon_percent_off".to_string(),
                        source: Box::new(e),
                    }
                })?,
            }),
            _ => None,
        };

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            contact: ContactDetails {
                name: row.try_get("contact_name")?,
                email: row.try_get("contact_email")?,
                phone: row.try_get("contact_phone")?,
            },
            shipping_address: row
                .try_get::<Option<Json<ShippingAddress>>, _>("shipping_address")?
                .map(|address| address.0),
            items: Vec::new(),
            subtotal: try_get_amount(row, "subtotal")?,
            discount: try_get_amount(row, "discount")?,
            grand_total: try_get_amount(row, "grand_total")?,
            coupon,
            payment_method: try_get_parsed(row, "payment_method")?,
            status: try_get_parsed(row, "status")?,
            placed_at: row.try_get::<SqlxTimestamp, _>("placed_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: OrderItemRecord {
                uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                name: row.try_get("name")?,
                kind: try_get_parsed(row, "kind")?,
                unit_price: try_get_amount(row, "unit_price")?,
                quantity: try_get_count(row, "quantity")?,
                customization: row
                    .try_get::<Option<Json<Customization>>, _>("customization")?
                    .map(|customization| customization.0),
                display_image: row.try_get("display_image")?,
                download_url: row.try_get("download_url")?,
            },
        })
    }
}
