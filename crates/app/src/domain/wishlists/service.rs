//! Wishlists service.

use async_trait::async_trait;
use bazaar::products::Customization;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        products::{PgProductsRepository, records::ProductUuid},
        wishlists::{
            errors::WishlistsServiceError,
            records::{NewWishlistItem, WishlistItemRecord},
            repository::PgWishlistsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistsService {
    db: Db,
    repository: PgWishlistsRepository,
    products: PgProductsRepository,
}

impl PgWishlistsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWishlistsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl WishlistsService for PgWishlistsService {
    async fn list_items(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<WishlistItemRecord>, WishlistsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let items = self.repository.list_items(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(items)
    }

    #[tracing::instrument(
        name = "wishlists.service.add_item",
        skip(self, item),
        fields(customer_uuid = %customer, product_uuid = %item.product_uuid),
        err
    )]
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewWishlistItem,
    ) -> Result<(), WishlistsServiceError> {
        let customization = item.customization.and_then(Customization::normalized);

        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let product = self
            .products
            .get_product(&mut tx, item.product_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => WishlistsServiceError::ProductNotFound,
                other => other.into(),
            })?;

        if let Some(customization) = &customization {
            product.specifics.check_customization(customization)?;
        }

        let display_image = item
            .display_image
            .filter(|image| !image.trim().is_empty())
            .unwrap_or_else(|| product.primary_image_url().to_string());

        let added = self
            .repository
            .add_item(
                &mut tx,
                customer,
                product.uuid,
                &display_image,
                customization.as_ref(),
            )
            .await?;

        tx.commit().await?;

        info!(added, "saved product to wishlist");

        Ok(())
    }

    #[tracing::instrument(
        name = "wishlists.service.remove_item",
        skip(self),
        fields(customer_uuid = %customer, product_uuid = %product),
        err
    )]
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let rows_affected = self.repository.remove_item(&mut tx, customer, product).await?;

        if rows_affected == 0 {
            return Err(WishlistsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// The customer's saved products, newest first.
    async fn list_items(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<WishlistItemRecord>, WishlistsServiceError>;

    /// Save a product. Saving it again is a no-op.
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewWishlistItem,
    ) -> Result<(), WishlistsServiceError>;

    /// Drop a saved product.
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn saved(product: ProductUuid) -> NewWishlistItem {
        NewWishlistItem {
            product_uuid: product,
            customization: None,
            display_image: None,
        }
    }

    #[tokio::test]
    async fn add_item_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let tee = ctx.create_product("Classic Tee", 250_00).await;

        ctx.wishlists.add_item(ctx.customer_uuid, saved(tee.uuid)).await?;
        ctx.wishlists.add_item(ctx.customer_uuid, saved(tee.uuid)).await?;

        let items = ctx.wishlists.list_items(ctx.customer_uuid).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Classic Tee");
        assert_eq!(items[0].unit_price, 250_00);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let tee = ctx.create_product("Classic Tee", 250_00).await;

        ctx.wishlists.add_item(ctx.customer_uuid, saved(tee.uuid)).await?;
        ctx.wishlists.remove_item(ctx.customer_uuid, tee.uuid).await?;

        let result = ctx.wishlists.remove_item(ctx.customer_uuid, tee.uuid).await;

        assert!(
            matches!(result, Err(WishlistsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn wishlist_is_private_to_its_customer() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_customer("Ravi").await;
        let tee = ctx.create_product("Classic Tee", 250_00).await;

        ctx.wishlists.add_item(ctx.customer_uuid, saved(tee.uuid)).await?;

        assert!(ctx.wishlists.list_items(other).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_returns_product_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .wishlists
            .add_item(ctx.customer_uuid, saved(ProductUuid::new()))
            .await;

        assert!(
            matches!(result, Err(WishlistsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }
}
