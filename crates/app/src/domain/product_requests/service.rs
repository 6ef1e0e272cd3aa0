//! Product requests service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        product_requests::{
            data::NewProductRequest,
            errors::ProductRequestsServiceError,
            records::{ProductRequestRecord, ProductRequestStatus, ProductRequestUuid},
            repository::PgProductRequestsRepository,
        },
    },
};

fn required(field: &'static str, value: &str) -> Result<String, ProductRequestsServiceError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ProductRequestsServiceError::MissingField(field));
    }

    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone)]
pub struct PgProductRequestsService {
    db: Db,
    repository: PgProductRequestsRepository,
}

impl PgProductRequestsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductRequestsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductRequestsService for PgProductRequestsService {
    #[tracing::instrument(
        name = "product_requests.service.submit",
        skip(self, request, point_in_time),
        fields(customer_uuid = %customer, product_name = tracing::field::Empty),
        err
    )]
    async fn submit(
        &self,
        customer: CustomerUuid,
        request: NewProductRequest,
        point_in_time: Timestamp,
    ) -> Result<ProductRequestRecord, ProductRequestsServiceError> {
        let request = NewProductRequest {
            product_name: required("product name", &request.product_name)?,
            description: required("description", &request.description)?,
            category: optional(request.category),
            estimated_price: request.estimated_price,
            reference_url: optional(request.reference_url),
        };

        tracing::Span::current().record(
            "product_name",
            tracing::field::display(&request.product_name),
        );

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_request(
                &mut tx,
                ProductRequestUuid::new(),
                customer,
                &request,
                point_in_time,
            )
            .await?;

        tx.commit().await?;

        info!(request_uuid = %created.uuid, "received product request");

        Ok(created)
    }

    async fn list_mine(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ProductRequestRecord>, ProductRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let requests = self
            .repository
            .list_customer_requests(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(requests)
    }

    async fn list_all(&self) -> Result<Vec<ProductRequestRecord>, ProductRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let requests = self.repository.list_requests(&mut tx).await?;

        tx.commit().await?;

        Ok(requests)
    }

    #[tracing::instrument(
        name = "product_requests.service.set_status",
        skip(self),
        fields(request_uuid = %request, status = %status),
        err
    )]
    async fn set_status(
        &self,
        request: ProductRequestUuid,
        status: ProductRequestStatus,
    ) -> Result<ProductRequestRecord, ProductRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_status(&mut tx, request, status).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProductRequestsService: Send + Sync {
    /// Ask the store to stock a product. Starts as Pending Review.
    async fn submit(
        &self,
        customer: CustomerUuid,
        request: NewProductRequest,
        point_in_time: Timestamp,
    ) -> Result<ProductRequestRecord, ProductRequestsServiceError>;

    /// The customer's own requests, newest first.
    async fn list_mine(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ProductRequestRecord>, ProductRequestsServiceError>;

    /// Every request, newest first.
    async fn list_all(&self) -> Result<Vec<ProductRequestRecord>, ProductRequestsServiceError>;

    /// Move a request to any status.
    async fn set_status(
        &self,
        request: ProductRequestUuid,
        status: ProductRequestStatus,
    ) -> Result<ProductRequestRecord, ProductRequestsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn lamp_request() -> NewProductRequest {
        NewProductRequest {
            product_name: "  Brass Diya Lamp ".to_string(),
            description: "Hand-cast lamp for festivals".to_string(),
            category: Some("   ".to_string()),
            estimated_price: Some(899_00),
            reference_url: Some("https://example.com/diya".to_string()),
        }
    }

    #[test]
    fn status_names_round_trip_through_storage() -> TestResult {
        for status in ProductRequestStatus::ALL {
            assert_eq!(status.as_str().parse::<ProductRequestStatus>()?, status);
        }

        assert!("Sourcing".parse::<ProductRequestStatus>().is_err());

        Ok(())
    }

    #[tokio::test]
    async fn submitted_request_starts_pending_review() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .product_requests
            .submit(ctx.customer_uuid, lamp_request(), Timestamp::now())
            .await?;

        assert_eq!(created.product_name, "Brass Diya Lamp");
        assert_eq!(created.category, None);
        assert_eq!(created.estimated_price, Some(899_00));
        assert_eq!(created.status, ProductRequestStatus::PendingReview);

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .product_requests
            .submit(
                ctx.customer_uuid,
                NewProductRequest {
                    product_name: "   ".to_string(),
                    ..lamp_request()
                },
                Timestamp::now(),
            )
            .await;

        assert!(
            matches!(result, Err(ProductRequestsServiceError::MissingField("product name"))),
            "expected MissingField, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customers_see_their_own_and_admins_see_all() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_customer("Ravi").await;

        let mine = ctx
            .product_requests
            .submit(ctx.customer_uuid, lamp_request(), Timestamp::now())
            .await?;

        ctx.product_requests
            .submit(other, lamp_request(), Timestamp::now())
            .await?;

        let listed = ctx.product_requests.list_mine(ctx.customer_uuid).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|r| r.uuid), Some(mine.uuid));
        assert_eq!(ctx.product_requests.list_all().await?.len(), 2);

        let updated = ctx
            .product_requests
            .set_status(mine.uuid, ProductRequestStatus::Sourced)
            .await?;

        assert_eq!(updated.status, ProductRequestStatus::Sourced);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_request_status_update_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .product_requests
            .set_status(ProductRequestUuid::new(), ProductRequestStatus::Approved)
            .await;

        assert!(
            matches!(result, Err(ProductRequestsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
