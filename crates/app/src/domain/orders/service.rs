//! Orders service.

use async_trait::async_trait;
use bazaar::{
    calendar::local_date,
    coupons::{CouponError, CouponRejection},
    orders::{OrderStatus, PaymentMethod, PaymentOutcome},
    pricing::CouponOutcome,
    products::ProductKind,
};
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{PgCartsRepository, pricing::price_items},
        coupons::PgCouponsRepository,
        customers::records::CustomerUuid,
        orders::{
            data::Checkout,
            errors::OrdersServiceError,
            records::{AppliedCoupon, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    time_zone: TimeZone,
    repository: PgOrdersRepository,
    carts: PgCartsRepository,
    coupons: PgCouponsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone) -> Self {
        Self {
            db,
            time_zone,
            repository: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
            coupons: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.checkout",
        skip(self, checkout, point_in_time),
        fields(customer_uuid = %customer, order_uuid = tracing::field::Empty),
        err
    )]
    async fn checkout(
        &self,
        customer: CustomerUuid,
        checkout: Checkout,
        point_in_time: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let items = self.carts.list_items(&mut tx, customer).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let ships = items
            .iter()
            .any(|item| item.product_kind != ProductKind::Digital);

        if ships && checkout.shipping_address.is_none() {
            return Err(OrdersServiceError::MissingShippingAddress);
        }

        let payment_method = PaymentMethod::for_kinds(items.iter().map(|item| item.product_kind));

        let coupon = self.carts.get_coupon(&mut tx, customer).await?;
        let today = local_date(point_in_time, &self.time_zone);
        let priced = price_items(items, coupon.as_ref().map(|c| c.to_coupon()).as_ref(), today)?;

        let applied = match (&priced.coupon, &coupon) {
            (CouponOutcome::NoLongerApplies { reason, .. }, _) => {
                return Err(CouponError::Rejected(*reason).into());
            }
            (CouponOutcome::Applied { code }, Some(record)) => Some((
                record,
                AppliedCoupon {
                    code: code.clone(),
                    percent_off: record.percent_off,
                },
            )),
            _ => None,
        };

        let uuid = OrderUuid::new();

        tracing::Span::current().record("order_uuid", tracing::field::display(uuid));

        let order = OrderRecord {
            uuid,
            customer_uuid: customer,
            contact: checkout.contact,
            shipping_address: checkout.shipping_address,
            items: Vec::new(),
            subtotal: priced.subtotal,
            discount: priced.discount,
            grand_total: priced.grand_total,
            coupon: applied.as_ref().map(|(_, applied)| applied.clone()),
            payment_method,
            status: payment_method.initial_status(),
            placed_at: point_in_time,
            updated_at: point_in_time,
        };

        let mut created = self.repository.create_order(&mut tx, &order).await?;

        for (position, line) in (0_u32..).zip(priced.items) {
            let digital = line.product_kind == ProductKind::Digital;

            let item = OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: line.product_uuid,
                name: line.product_name,
                kind: line.product_kind,
                unit_price: line.unit_price,
                quantity: line.quantity,
                customization: line.customization,
                display_image: line.display_image,
                download_url: line.download_url.filter(|_| digital),
            };

            let item = self
                .repository
                .create_item(&mut tx, created.uuid, position, &item)
                .await?;

            created.items.push(item);
        }

        if let Some((record, _)) = &applied {
            let redeemed = self.coupons.redeem_coupon(&mut tx, record.uuid).await?;

            if !redeemed {
                let reason = match record.max_uses {
                    Some(max_uses) => CouponRejection::LimitReached { max_uses },
                    None => CouponRejection::Inactive,
                };

                return Err(CouponError::Rejected(reason).into());
            }
        }

        self.carts.clear_items(&mut tx, customer).await?;
        self.carts.set_coupon(&mut tx, customer, None).await?;

        tx.commit().await?;

        info!(
            order_uuid = %created.uuid,
            grand_total = created.grand_total,
            payment_method = %created.payment_method,
            status = %created.status,
            "placed order"
        );

        Ok(created)
    }

    #[tracing::instrument(
        name = "orders.service.confirm_payment",
        skip(self),
        fields(customer_uuid = %customer, order_uuid = %order),
        err
    )]
    async fn confirm_payment(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        outcome: PaymentOutcome,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let current = self
            .repository
            .lock_customer_order(&mut tx, customer, order)
            .await?;

        let status = current.status.after_payment(outcome)?;

        let updated = self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(order_uuid = %order, status = %updated.status, "recorded payment");

        Ok(updated)
    }

    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let orders = self.repository.list_customer_orders(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let order = self
            .repository
            .get_customer_order(&mut tx, customer, order)
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.set_status",
        skip(self),
        fields(order_uuid = %order, status = %status),
        err
    )]
    async fn set_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(order_uuid = %order, status = %status, "updated order status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the customer's cart into an order and empty the cart.
    ///
    /// Fails without side effects if the attached coupon no longer applies or
    /// runs out of uses while the order is being placed.
    async fn checkout(
        &self,
        customer: CustomerUuid,
        checkout: Checkout,
        point_in_time: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Record the result of an online payment for an order awaiting one.
    async fn confirm_payment(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        outcome: PaymentOutcome,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The customer's orders, newest first.
    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One of the customer's orders.
    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Every order in the store, newest first.
    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Set any status on an order.
    async fn set_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
