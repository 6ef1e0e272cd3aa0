//! Gifts service.

use async_trait::async_trait;
use bazaar::rewards::{GIFT_THRESHOLD, gift_eligible, kept_product_count};
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        gifts::{
            data::GiftClaim,
            errors::GiftsServiceError,
            records::{GiftClaimRecord, GiftProgress},
            repository::PgGiftsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgGiftsService {
    db: Db,
    repository: PgGiftsRepository,
}

impl PgGiftsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgGiftsRepository::new(),
        }
    }

    async fn load_progress(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<GiftProgress, GiftsServiceError> {
        let lines = self.repository.list_purchased_lines(tx, customer).await?;
        let claimed = self.repository.find_claim(tx, customer).await?.is_some();
        let kept = kept_product_count(&lines);

        Ok(GiftProgress {
            kept,
            threshold: GIFT_THRESHOLD,
            claimed,
            eligible: gift_eligible(kept, claimed),
        })
    }
}

#[async_trait]
impl GiftsService for PgGiftsService {
    async fn progress(&self, customer: CustomerUuid) -> Result<GiftProgress, GiftsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let progress = self.load_progress(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(progress)
    }

    #[tracing::instrument(
        name = "gifts.service.claim",
        skip(self, claim, point_in_time),
        fields(customer_uuid = %customer, kept = tracing::field::Empty),
        err
    )]
    async fn claim(
        &self,
        customer: CustomerUuid,
        claim: GiftClaim,
        point_in_time: Timestamp,
    ) -> Result<GiftClaimRecord, GiftsServiceError> {
        let claim = GiftClaim {
            recipient_name: claim.recipient_name.trim().to_string(),
            phone: claim.phone.trim().to_string(),
            shipping_address: claim.shipping_address,
        };

        if claim.recipient_name.is_empty() {
            return Err(GiftsServiceError::MissingField("recipient name"));
        }

        if claim.phone.is_empty() {
            return Err(GiftsServiceError::MissingField("phone"));
        }

        let mut tx = self.db.begin_transaction().await?;

        let progress = self.load_progress(&mut tx, customer).await?;

        tracing::Span::current().record("kept", progress.kept);

        if progress.claimed {
            return Err(GiftsServiceError::AlreadyClaimed);
        }

        if !progress.eligible {
            return Err(GiftsServiceError::NotEligible {
                kept: progress.kept,
                threshold: progress.threshold,
            });
        }

        // A concurrent claim loses on the unique customer constraint.
        let created = self
            .repository
            .create_claim(&mut tx, customer, &claim, progress.kept, point_in_time)
            .await?;

        tx.commit().await?;

        info!(claim_uuid = %created.uuid, "claimed free gift");

        Ok(created)
    }

    async fn list_claims(&self) -> Result<Vec<GiftClaimRecord>, GiftsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let claims = self.repository.list_claims(&mut tx).await?;

        tx.commit().await?;

        Ok(claims)
    }
}

#[automock]
#[async_trait]
pub trait GiftsService: Send + Sync {
    /// Kept-product count against the threshold, and whether the gift is claimable.
    async fn progress(&self, customer: CustomerUuid) -> Result<GiftProgress, GiftsServiceError>;

    /// Claim the one-off gift.
    async fn claim(
        &self,
        customer: CustomerUuid,
        claim: GiftClaim,
        point_in_time: Timestamp,
    ) -> Result<GiftClaimRecord, GiftsServiceError>;

    /// Every claim, newest first.
    async fn list_claims(&self) -> Result<Vec<GiftClaimRecord>, GiftsServiceError>;
}

#[cfg(test)]
mod tests {
    use bazaar::{orders::OrderStatus, returns::ReturnStatus};
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::OrdersService,
            returns::{ReturnsService, data::NewReturnRequest},
        },
        test::{
            TestContext,
            helpers::{place_order, shipping_address},
        },
    };

    use super::*;

    fn gift_claim() -> GiftClaim {
        GiftClaim {
            recipient_name: " Asha Rao ".to_string(),
            phone: "+91 98450 12345".to_string(),
            shipping_address: shipping_address(),
        }
    }

    #[tokio::test]
    async fn new_customer_has_no_progress() -> TestResult {
        let ctx = TestContext::new().await;

        let progress = ctx.gifts.progress(ctx.customer_uuid).await?;

        assert_eq!(
            progress,
            GiftProgress {
                kept: 0,
                threshold: 5,
                claimed: false,
                eligible: false,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn five_kept_products_unlock_a_single_claim() -> TestResult {
        let ctx = TestContext::new().await;

        place_order(&ctx, ctx.customer_uuid, 3, Timestamp::now()).await;
        place_order(&ctx, ctx.customer_uuid, 2, Timestamp::now()).await;

        assert!(ctx.gifts.progress(ctx.customer_uuid).await?.eligible);

        let claim = ctx
            .gifts
            .claim(ctx.customer_uuid, gift_claim(), Timestamp::now())
            .await?;

        assert_eq!(claim.recipient_name, "Asha Rao");
        assert_eq!(claim.kept_products, 5);

        let progress = ctx.gifts.progress(ctx.customer_uuid).await?;

        assert!(progress.claimed);
        assert!(!progress.eligible);

        let again = ctx
            .gifts
            .claim(ctx.customer_uuid, gift_claim(), Timestamp::now())
            .await;

        assert!(
            matches!(again, Err(GiftsServiceError::AlreadyClaimed)),
            "expected AlreadyClaimed, got {again:?}"
        );

        assert_eq!(ctx.gifts.list_claims().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_orders_and_accepted_returns_do_not_count() -> TestResult {
        let ctx = TestContext::new().await;

        let cancelled = place_order(&ctx, ctx.customer_uuid, 4, Timestamp::now()).await;
        ctx.orders.set_status(cancelled.uuid, OrderStatus::Cancelled).await?;

        let returned = place_order(&ctx, ctx.customer_uuid, 2, Timestamp::now()).await;
        place_order(&ctx, ctx.customer_uuid, 3, Timestamp::now()).await;

        let request = ctx
            .returns
            .file_return(
                ctx.customer_uuid,
                NewReturnRequest {
                    order_uuid: returned.uuid,
                    order_item_uuid: returned.items[0].uuid,
                    quantity: 2,
                    upi_id: "asha@okhdfc".to_string(),
                    reason: "Wrong size delivered".to_string(),
                },
                Timestamp::now(),
            )
            .await?;

        // A pending return still counts as kept.
        assert_eq!(ctx.gifts.progress(ctx.customer_uuid).await?.kept, 5);

        ctx.returns.set_status(request.uuid, ReturnStatus::Approved).await?;

        assert_eq!(ctx.gifts.progress(ctx.customer_uuid).await?.kept, 3);

        let result = ctx
            .gifts
            .claim(ctx.customer_uuid, gift_claim(), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(GiftsServiceError::NotEligible { kept: 3, threshold: 5 })),
            "expected NotEligible, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn approved_return_is_not_kept_behind_a_newer_pending_one() -> TestResult {
        let ctx = TestContext::new().await;

        let placed_at = Timestamp::now();
        let order = place_order(&ctx, ctx.customer_uuid, 2, placed_at).await;

        let return_request = |reason: &str| NewReturnRequest {
            order_uuid: order.uuid,
            order_item_uuid: order.items[0].uuid,
            quantity: 2,
            upi_id: "asha@okhdfc".to_string(),
            reason: reason.to_string(),
        };

        let older = ctx
            .returns
            .file_return(ctx.customer_uuid, return_request("Wrong size delivered"), placed_at)
            .await?;

        ctx.returns.set_status(older.uuid, ReturnStatus::Rejected).await?;

        ctx.returns
            .file_return(
                ctx.customer_uuid,
                return_request("Colour differs from the photo"),
                placed_at + 1.hour(),
            )
            .await?;

        assert_eq!(ctx.gifts.progress(ctx.customer_uuid).await?.kept, 2);

        ctx.returns.set_status(older.uuid, ReturnStatus::Approved).await?;

        assert_eq!(ctx.gifts.progress(ctx.customer_uuid).await?.kept, 0);

        Ok(())
    }

    #[tokio::test]
    async fn claim_requires_a_phone_number() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .gifts
            .claim(
                ctx.customer_uuid,
                GiftClaim {
                    phone: "  ".to_string(),
                    ..gift_claim()
                },
                Timestamp::now(),
            )
            .await;

        assert!(
            matches!(result, Err(GiftsServiceError::MissingField("phone"))),
            "expected MissingField, got {result:?}"
        );

        Ok(())
    }
}
