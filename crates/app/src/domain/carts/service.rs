//! Carts service.

use async_trait::async_trait;
use bazaar::{calendar::local_date, coupons::validate_code, products::Customization};
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            pricing::{price_items, subtotal},
            records::{CartItemUuid, PricedCart},
            repository::{CartItemInsert, PgCartsRepository},
        },
        coupons::PgCouponsRepository,
        customers::records::CustomerUuid,
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    time_zone: TimeZone,
    repository: PgCartsRepository,
    products: PgProductsRepository,
    coupons: PgCouponsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone) -> Self {
        Self {
            db,
            time_zone,
            repository: PgCartsRepository::new(),
            products: PgProductsRepository::new(),
            coupons: PgCouponsRepository::new(),
        }
    }

    async fn priced_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        let items = self.repository.list_items(tx, customer).await?;
        let coupon = self.repository.get_coupon(tx, customer).await?;

        let today = local_date(point_in_time, &self.time_zone);
        let coupon = coupon.map(|coupon| coupon.to_coupon());

        Ok(price_items(items, coupon.as_ref(), today)?)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(
        &self,
        customer: CustomerUuid,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let cart = self.priced_cart(&mut tx, customer, point_in_time).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item, point_in_time),
        fields(customer_uuid = %customer, product_uuid = %item.product_uuid),
        err
    )]
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let customization = item.customization.and_then(Customization::normalized);

        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let product = self
            .products
            .get_product(&mut tx, item.product_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                other => other.into(),
            })?;

        if let Some(customization) = &customization {
            product.specifics.check_customization(customization)?;
        }

        let display_image = item
            .display_image
            .filter(|image| !image.trim().is_empty())
            .unwrap_or_else(|| product.primary_image_url().to_string());

        let existing = self
            .repository
            .list_items(&mut tx, customer)
            .await?
            .into_iter()
            .find(|line| {
                line.product_uuid == product.uuid
                    && line.customization == customization
                    && line.display_image == display_image
            });

        match existing {
            Some(line) => {
                self.repository
                    .increment_item(&mut tx, customer, line.uuid, item.quantity)
                    .await?;

                info!(cart_item_uuid = %line.uuid, quantity = item.quantity, "merged cart line");
            }
            None => {
                let uuid = CartItemUuid::new();

                self.repository
                    .create_item(
                        &mut tx,
                        customer,
                        CartItemInsert {
                            uuid,
                            product_uuid: product.uuid,
                            quantity: item.quantity,
                            customization: customization.as_ref(),
                            display_image: &display_image,
                        },
                    )
                    .await?;

                info!(cart_item_uuid = %uuid, quantity = item.quantity, "added cart line");
            }
        }

        let cart = self.priced_cart(&mut tx, customer, point_in_time).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_quantity",
        skip(self, point_in_time),
        fields(customer_uuid = %customer, cart_item_uuid = %item),
        err
    )]
    async fn update_quantity(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        quantity: i64,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let rows_affected = if quantity <= 0 {
            self.repository.delete_item(&mut tx, customer, item).await?
        } else {
            let quantity =
                u32::try_from(quantity).map_err(|_err| CartsServiceError::InvalidQuantity)?;

            self.repository
                .set_item_quantity(&mut tx, customer, item, quantity)
                .await?
        };

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let cart = self.priced_cart(&mut tx, customer, point_in_time).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self, point_in_time),
        fields(customer_uuid = %customer, cart_item_uuid = %item),
        err
    )]
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let rows_affected = self.repository.delete_item(&mut tx, customer, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let cart = self.priced_cart(&mut tx, customer, point_in_time).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.clear_cart",
        skip(self),
        fields(customer_uuid = %customer),
        err
    )]
    async fn clear_cart(&self, customer: CustomerUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let removed = self.repository.clear_items(&mut tx, customer).await?;

        self.repository.set_coupon(&mut tx, customer, None).await?;

        tx.commit().await?;

        info!(removed, "cleared cart");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.apply_coupon",
        skip(self, code, point_in_time),
        fields(customer_uuid = %customer, code = tracing::field::Empty),
        err
    )]
    async fn apply_coupon(
        &self,
        customer: CustomerUuid,
        code: String,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        let code = validate_code(&code)?;

        tracing::Span::current().record("code", tracing::field::display(&code));

        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let coupon = self
            .coupons
            .find_by_code(&mut tx, &code)
            .await?
            .ok_or(CartsServiceError::CouponNotFound)?;

        let items = self.repository.list_items(&mut tx, customer).await?;
        let today = local_date(point_in_time, &self.time_zone);

        coupon
            .to_coupon()
            .check(subtotal(&items)?, today)
            .map_err(|reason| CartsServiceError::Coupon(reason.into()))?;

        self.repository
            .set_coupon(&mut tx, customer, Some(coupon.uuid))
            .await?;

        let cart = self.priced_cart(&mut tx, customer, point_in_time).await?;

        tx.commit().await?;

        info!(coupon_uuid = %coupon.uuid, discount = cart.discount, "applied coupon");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_coupon",
        skip(self, point_in_time),
        fields(customer_uuid = %customer),
        err
    )]
    async fn remove_coupon(
        &self,
        customer: CustomerUuid,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.repository.set_coupon(&mut tx, customer, None).await?;

        let cart = self.priced_cart(&mut tx, customer, point_in_time).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The customer's cart, priced as of `point_in_time`.
    async fn get_cart(
        &self,
        customer: CustomerUuid,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError>;

    /// Add a product, merging into a matching line when one exists.
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError>;

    /// Set a line's quantity. Zero or less removes the line.
    async fn update_quantity(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        quantity: i64,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError>;

    /// Remove a line.
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError>;

    /// Empty the cart and detach its coupon.
    async fn clear_cart(&self, customer: CustomerUuid) -> Result<(), CartsServiceError>;

    /// Attach a coupon after checking it applies to the current contents.
    async fn apply_coupon(
        &self,
        customer: CustomerUuid,
        code: String,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError>;

    /// Detach the cart's coupon.
    async fn remove_coupon(
        &self,
        customer: CustomerUuid,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError>;
}
