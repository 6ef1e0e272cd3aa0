//! Recommendations service.

use std::sync::Arc;

use async_trait::async_trait;
use bazaar::recommendations::{
    HISTORY_LIMIT, history_line, match_catalog, parse_recommendations, render_prompt,
};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        history::PgHistoryRepository,
        products::{PgProductsRepository, records::ProductRecord},
        recommendations::errors::RecommendationsServiceError,
    },
    integrations::TextGenerator,
};

pub struct PgRecommendationsService {
    db: Db,
    generator: Arc<dyn TextGenerator>,
    history: PgHistoryRepository,
    products: PgProductsRepository,
}

impl std::fmt::Debug for PgRecommendationsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRecommendationsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgRecommendationsService {
    #[must_use]
    pub fn new(db: Db, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            db,
            generator,
            history: PgHistoryRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl RecommendationsService for PgRecommendationsService {
    #[tracing::instrument(
        name = "recommendations.service.recommend",
        skip(self),
        fields(customer_uuid = %customer),
        err
    )]
    async fn recommend(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ProductRecord>, RecommendationsServiceError> {
        let limit = i64::try_from(HISTORY_LIMIT).unwrap_or(i64::MAX);

        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let viewed: Vec<String> = self
            .history
            .list_recent(&mut tx, customer, limit)
            .await?
            .into_iter()
            .map(|view| view.product_name)
            .collect();

        tx.commit().await?;

        if viewed.is_empty() {
            return Ok(Vec::new());
        }

        let reply = self
            .generator
            .generate(render_prompt(&history_line(&viewed)))
            .await?;

        let suggestions = parse_recommendations(&reply);

        if suggestions.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin_transaction().await?;

        let catalog = self
            .products
            .list_products_by_name(&mut tx, &suggestions)
            .await?;

        tx.commit().await?;

        let matched: Vec<ProductRecord> =
            match_catalog(&suggestions, &catalog, &viewed, |product| product.name.as_str())
                .into_iter()
                .cloned()
                .collect();

        info!(
            suggested = suggestions.len(),
            matched = matched.len(),
            "built recommendations"
        );

        Ok(matched)
    }
}

#[automock]
#[async_trait]
pub trait RecommendationsService: Send + Sync {
    /// Catalog products suggested from the customer's recent browsing.
    async fn recommend(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ProductRecord>, RecommendationsServiceError>;
}
