//! Returns service.

use async_trait::async_trait;
use bazaar::{
    calendar::local_date,
    orders::OrderStatus,
    returns::{
        ReturnStatus, ReturnWindow, check_return_eligibility, validate_reason, validate_upi_id,
    },
};
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        orders::{
            PgOrdersRepository,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        returns::{
            data::NewReturnRequest,
            errors::ReturnsServiceError,
            records::{ReturnEligibility, ReturnRequestRecord, ReturnRequestUuid},
            repository::{PgReturnsRepository, ReturnRequestInsert},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReturnsService {
    db: Db,
    time_zone: TimeZone,
    window: ReturnWindow,
    repository: PgReturnsRepository,
    orders: PgOrdersRepository,
}

impl PgReturnsService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone) -> Self {
        Self {
            db,
            time_zone,
            window: ReturnWindow::default(),
            repository: PgReturnsRepository::new(),
            orders: PgOrdersRepository::new(),
        }
    }

    async fn load_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<(OrderRecord, OrderItemRecord), ReturnsServiceError> {
        let order = self
            .orders
            .lock_customer_order(tx, customer, order)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => ReturnsServiceError::OrderNotFound,
                other => other.into(),
            })?;

        let line = order
            .item(item)
            .cloned()
            .ok_or(ReturnsServiceError::ItemNotFound)?;

        Ok((order, line))
    }

    async fn eligibility(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRecord,
        line: &OrderItemRecord,
        point_in_time: Timestamp,
    ) -> Result<ReturnEligibility, ReturnsServiceError> {
        let existing = self
            .repository
            .line_statuses(tx, order.uuid, line.product_uuid)
            .await?;

        let placed_on = local_date(order.placed_at, &self.time_zone);
        let today = local_date(point_in_time, &self.time_zone);

        let verdict = check_return_eligibility(order.status, existing, placed_on, today, self.window);

        Ok(ReturnEligibility {
            last_day: self.window.last_day(placed_on),
            ineligibility: verdict.err(),
        })
    }
}

#[async_trait]
impl ReturnsService for PgReturnsService {
    async fn check_eligibility(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        item: OrderItemUuid,
        point_in_time: Timestamp,
    ) -> Result<ReturnEligibility, ReturnsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let (order, line) = self.load_line(&mut tx, customer, order, item).await?;

        let eligibility = self.eligibility(&mut tx, &order, &line, point_in_time).await?;

        tx.commit().await?;

        Ok(eligibility)
    }

    #[tracing::instrument(
        name = "returns.service.file_return",
        skip(self, request, point_in_time),
        fields(
            customer_uuid = %customer,
            order_uuid = %request.order_uuid,
            order_item_uuid = %request.order_item_uuid
        ),
        err
    )]
    async fn file_return(
        &self,
        customer: CustomerUuid,
        request: NewReturnRequest,
        point_in_time: Timestamp,
    ) -> Result<ReturnRequestRecord, ReturnsServiceError> {
        let upi_id = validate_upi_id(&request.upi_id)?;
        let reason = validate_reason(&request.reason)?;

        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let (order, line) = self
            .load_line(&mut tx, customer, request.order_uuid, request.order_item_uuid)
            .await?;

        if request.quantity == 0 || request.quantity > line.quantity {
            return Err(ReturnsServiceError::InvalidQuantity {
                ordered: line.quantity,
            });
        }

        let eligibility = self.eligibility(&mut tx, &order, &line, point_in_time).await?;

        if let Some(ineligibility) = eligibility.ineligibility {
            return Err(ineligibility.into());
        }

        let created = self
            .repository
            .create_request(
                &mut tx,
                customer,
                ReturnRequestInsert {
                    uuid: ReturnRequestUuid::new(),
                    order_uuid: order.uuid,
                    order_item_uuid: line.uuid,
                    quantity: request.quantity,
                    upi_id,
                    reason,
                    created_at: point_in_time,
                },
            )
            .await?;

        self.orders
            .update_status(&mut tx, order.uuid, OrderStatus::ReturnRequested)
            .await?;

        tx.commit().await?;

        info!(return_uuid = %created.uuid, quantity = created.quantity, "filed return request");

        Ok(created)
    }

    async fn list_returns(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ReturnRequestRecord>, ReturnsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let requests = self.repository.list_customer_requests(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(requests)
    }

    async fn list_all_returns(&self) -> Result<Vec<ReturnRequestRecord>, ReturnsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let requests = self.repository.list_requests(&mut tx).await?;

        tx.commit().await?;

        Ok(requests)
    }

    #[tracing::instrument(
        name = "returns.service.set_status",
        skip(self),
        fields(return_uuid = %request, status = %status),
        err
    )]
    async fn set_status(
        &self,
        request: ReturnRequestUuid,
        status: ReturnStatus,
    ) -> Result<ReturnRequestRecord, ReturnsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_status(&mut tx, request, status).await?;

        tx.commit().await?;

        info!(return_uuid = %request, status = %status, "updated return status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ReturnsService: Send + Sync {
    /// Whether a line of one of the customer's orders can be returned now.
    async fn check_eligibility(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        item: OrderItemUuid,
        point_in_time: Timestamp,
    ) -> Result<ReturnEligibility, ReturnsServiceError>;

    /// File a return for a line and mark the order as having a return requested.
    async fn file_return(
        &self,
        customer: CustomerUuid,
        request: NewReturnRequest,
        point_in_time: Timestamp,
    ) -> Result<ReturnRequestRecord, ReturnsServiceError>;

    /// The customer's return requests, newest first.
    async fn list_returns(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ReturnRequestRecord>, ReturnsServiceError>;

    /// Every return request, newest first.
    async fn list_all_returns(&self) -> Result<Vec<ReturnRequestRecord>, ReturnsServiceError>;

    /// Set any status on a return request.
    async fn set_status(
        &self,
        request: ReturnRequestUuid,
        status: ReturnStatus,
    ) -> Result<ReturnRequestRecord, ReturnsServiceError>;
}

#[cfg(test)]
mod tests {
    use bazaar::returns::{Ineligibility, RefundDetailsError};
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        domain::orders::OrdersService,
        test::{TestContext, helpers::place_order},
    };

    use super::*;

    fn request(order: &OrderRecord, quantity: u32) -> NewReturnRequest {
        NewReturnRequest {
            order_uuid: order.uuid,
            order_item_uuid: order.items[0].uuid,
            quantity,
            upi_id: "ravi.k@okaxis".to_string(),
            reason: "Colour differs from the photos".to_string(),
        }
    }

    #[tokio::test]
    async fn return_filed_on_day_four_just_after_midnight_is_accepted() -> TestResult {
        let ctx = TestContext::new().await;

        // 23:59 on 1 March in Kolkata.
        let placed: Timestamp = "2026-03-01T18:29:00Z".parse()?;
        let order = place_order(&ctx, ctx.customer_uuid, 2, placed).await;

        // 00:01 on 5 March in Kolkata.
        let filed: Timestamp = "2026-03-04T18:31:00Z".parse()?;

        let eligibility = ctx
            .returns
            .check_eligibility(ctx.customer_uuid, order.uuid, order.items[0].uuid, filed)
            .await?;

        assert!(eligibility.is_eligible());
        assert_eq!(eligibility.last_day, date(2026, 3, 5));

        let created = ctx
            .returns
            .file_return(ctx.customer_uuid, request(&order, 1), filed)
            .await?;

        assert_eq!(created.status, ReturnStatus::Pending);
        assert_eq!(created.product_name, "Classic Tee");

        let order = ctx.orders.get_order(ctx.customer_uuid, order.uuid).await?;

        assert_eq!(order.status, OrderStatus::ReturnRequested);

        Ok(())
    }

    #[tokio::test]
    async fn return_on_day_five_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let placed: Timestamp = "2026-03-01T04:30:00Z".parse()?;
        let order = place_order(&ctx, ctx.customer_uuid, 1, placed).await;

        let filed: Timestamp = "2026-03-06T04:30:00Z".parse()?;

        let result = ctx
            .returns
            .file_return(ctx.customer_uuid, request(&order, 1), filed)
            .await;

        assert!(
            matches!(
                result,
                Err(ReturnsServiceError::Ineligible(Ineligibility::WindowElapsed { .. }))
            ),
            "expected WindowElapsed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn second_request_for_the_same_line_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = Timestamp::now();
        let order = place_order(&ctx, ctx.customer_uuid, 2, placed).await;

        let first = ctx
            .returns
            .file_return(ctx.customer_uuid, request(&order, 1), placed)
            .await?;

        let result = ctx
            .returns
            .file_return(ctx.customer_uuid, request(&order, 1), placed)
            .await;

        assert!(
            matches!(
                result,
                Err(ReturnsServiceError::Ineligible(Ineligibility::AlreadyRequested(
                    ReturnStatus::Pending
                )))
            ),
            "expected AlreadyRequested, got {result:?}"
        );

        ctx.returns.set_status(first.uuid, ReturnStatus::Rejected).await?;

        ctx.returns
            .file_return(ctx.customer_uuid, request(&order, 1), placed)
            .await?;

        assert_eq!(ctx.returns.list_returns(ctx.customer_uuid).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_orders_cannot_be_returned() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = Timestamp::now();
        let order = place_order(&ctx, ctx.customer_uuid, 1, placed).await;

        ctx.orders.set_status(order.uuid, OrderStatus::Cancelled).await?;

        let result = ctx
            .returns
            .file_return(ctx.customer_uuid, request(&order, 1), placed)
            .await;

        assert!(
            matches!(
                result,
                Err(ReturnsServiceError::Ineligible(Ineligibility::OrderClosed(
                    OrderStatus::Cancelled
                )))
            ),
            "expected OrderClosed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn refund_details_and_quantity_are_validated() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = Timestamp::now();
        let order = place_order(&ctx, ctx.customer_uuid, 2, placed).await;

        let bad_upi = ctx
            .returns
            .file_return(
                ctx.customer_uuid,
                NewReturnRequest {
                    upi_id: "ravi@123".to_string(),
                    ..request(&order, 1)
                },
                placed,
            )
            .await;

        assert!(
            matches!(
                bad_upi,
                Err(ReturnsServiceError::InvalidRefundDetails(RefundDetailsError::InvalidUpiId))
            ),
            "expected InvalidUpiId, got {bad_upi:?}"
        );

        let short_reason = ctx
            .returns
            .file_return(
                ctx.customer_uuid,
                NewReturnRequest {
                    reason: "too small".to_string(),
                    ..request(&order, 1)
                },
                placed,
            )
            .await;

        assert!(
            matches!(
                short_reason,
                Err(ReturnsServiceError::InvalidRefundDetails(RefundDetailsError::ReasonTooShort))
            ),
            "expected ReasonTooShort, got {short_reason:?}"
        );

        let too_many = ctx
            .returns
            .file_return(ctx.customer_uuid, request(&order, 3), placed)
            .await;

        assert!(
            matches!(
                too_many,
                Err(ReturnsServiceError::InvalidQuantity { ordered: 2 })
            ),
            "expected InvalidQuantity, got {too_many:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_customers_cannot_return_my_order() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_customer("Ravi").await;
        let placed = Timestamp::now();
        let order = place_order(&ctx, ctx.customer_uuid, 1, placed).await;

        let result = ctx.returns.file_return(other, request(&order, 1), placed).await;

        assert!(
            matches!(result, Err(ReturnsServiceError::OrderNotFound)),
            "expected OrderNotFound, got {result:?}"
        );

        assert!(ctx.returns.list_all_returns().await?.is_empty());

        Ok(())
    }
}
