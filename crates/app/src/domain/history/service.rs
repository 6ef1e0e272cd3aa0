//! Browsing history service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        history::{
            errors::HistoryServiceError, records::ViewRecord, repository::PgHistoryRepository,
        },
        products::{PgProductsRepository, records::ProductUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgHistoryService {
    db: Db,
    repository: PgHistoryRepository,
    products: PgProductsRepository,
}

impl PgHistoryService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgHistoryRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl HistoryService for PgHistoryService {
    #[tracing::instrument(
        name = "history.service.record_view",
        skip(self, point_in_time),
        fields(customer_uuid = %customer, product_uuid = %product),
        err
    )]
    async fn record_view(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        point_in_time: Timestamp,
    ) -> Result<(), HistoryServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let product = self.products.get_product(&mut tx, product).await?;

        self.repository
            .record_view(&mut tx, customer, product.uuid, &product.name, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_recent(
        &self,
        customer: CustomerUuid,
        limit: u32,
    ) -> Result<Vec<ViewRecord>, HistoryServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let views = self
            .repository
            .list_recent(&mut tx, customer, i64::from(limit))
            .await?;

        tx.commit().await?;

        Ok(views)
    }
}

#[automock]
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Note that the customer viewed a product. Repeat views move it to the front.
    async fn record_view(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        point_in_time: Timestamp,
    ) -> Result<(), HistoryServiceError>;

    /// Up to `limit` viewed products, most recent first.
    async fn list_recent(
        &self,
        customer: CustomerUuid,
        limit: u32,
    ) -> Result<Vec<ViewRecord>, HistoryServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn repeat_view_moves_product_to_front() -> TestResult {
        let ctx = TestContext::new().await;
        let tee = ctx.create_product("Classic Tee", 250_00).await;
        let mug = ctx.create_product("Photo Mug", 199_00).await;
        let start = Timestamp::now();

        ctx.history.record_view(ctx.customer_uuid, tee.uuid, start).await?;
        ctx.history
            .record_view(ctx.customer_uuid, mug.uuid, start + 1.minute())
            .await?;
        ctx.history
            .record_view(ctx.customer_uuid, tee.uuid, start + 2.minutes())
            .await?;

        let views = ctx.history.list_recent(ctx.customer_uuid, 10).await?;
        let names: Vec<&str> = views.iter().map(|v| v.product_name.as_str()).collect();

        assert_eq!(names, vec!["Classic Tee", "Photo Mug"]);

        let limited = ctx.history.list_recent(ctx.customer_uuid, 1).await?;

        assert_eq!(limited.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn record_view_unknown_product_fails() {
        let ctx = TestContext::new().await;

        let result = ctx
            .history
            .record_view(ctx.customer_uuid, ProductUuid::new(), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(HistoryServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }
}
