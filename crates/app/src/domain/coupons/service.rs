//! Coupons service.

use async_trait::async_trait;
use bazaar::coupons::{CouponError, MAX_PERCENT_OFF, validate_code};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::coupons::{
        data::{CouponTerms, NewCoupon},
        errors::CouponsServiceError,
        records::{CouponRecord, CouponUuid},
        repository::PgCouponsRepository,
    },
};

fn validate_terms(terms: &CouponTerms) -> Result<(), CouponError> {
    if terms.percent_off > MAX_PERCENT_OFF {
        return Err(CouponError::PercentOutOfRange(terms.percent_off));
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn list_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupons = self.repository.list_coupons(&mut tx).await?;

        tx.commit().await?;

        Ok(coupons)
    }

    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupon = self.repository.get_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        Ok(coupon)
    }

    async fn find_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError> {
        let code = validate_code(code)?;

        let mut tx = self.db.begin_transaction().await?;

        let coupon = self
            .repository
            .find_by_code(&mut tx, &code)
            .await?
            .ok_or(CouponsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(coupon)
    }

    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, coupon),
        fields(coupon_uuid = %coupon.uuid, code = tracing::field::Empty),
        err
    )]
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        let code = validate_code(&coupon.code)?;

        tracing::Span::current().record("code", tracing::field::display(&code));

        validate_terms(&coupon.terms)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_coupon(&mut tx, coupon.uuid, &code, &coupon.terms)
            .await?;

        tx.commit().await?;

        info!(
            coupon_uuid = %created.uuid,
            code = %created.code,
            percent_off = created.percent_off,
            "created coupon"
        );

        Ok(created)
    }

    #[tracing::instrument(
        name = "coupons.service.update_coupon",
        skip(self, terms),
        fields(coupon_uuid = %coupon),
        err
    )]
    async fn update_coupon(
        &self,
        coupon: CouponUuid,
        terms: CouponTerms,
    ) -> Result<CouponRecord, CouponsServiceError> {
        validate_terms(&terms)?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_coupon(&mut tx, coupon, &terms).await?;

        tx.commit().await?;

        info!(coupon_uuid = %updated.uuid, active = updated.active, "updated coupon");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "coupons.service.delete_coupon",
        skip(self),
        fields(coupon_uuid = %coupon),
        err
    )]
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_coupon(&mut tx, coupon).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(coupon_uuid = %coupon, "deleted coupon");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// List every coupon, ordered by code.
    async fn list_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// Retrieve a single coupon.
    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError>;

    /// Look a coupon up by code, ignoring case and surrounding whitespace.
    async fn find_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError>;

    /// Create a coupon. The code is stored upper-cased.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Replace a coupon's terms. The code and usage count are left alone.
    async fn update_coupon(
        &self,
        coupon: CouponUuid,
        terms: CouponTerms,
    ) -> Result<CouponRecord, CouponsServiceError>;

    /// Delete a coupon. Carts holding it lose their coupon.
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError>;
}

#[cfg(test)]
mod tests {
    use bazaar::coupons::{Coupon, CouponRejection};
    use jiff::civil::date;
    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::coupon_terms};

    use super::*;

    #[tokio::test]
    async fn create_coupon_normalizes_code() -> TestResult {
        let ctx = TestContext::new().await;

        let coupon = ctx
            .coupons
            .create_coupon(NewCoupon {
                uuid: CouponUuid::new(),
                code: "  save10 ".to_string(),
                terms: coupon_terms(10),
            })
            .await?;

        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.times_used, 0);

        let found = ctx.coupons.find_coupon("Save10").await?;

        assert_eq!(found.uuid, coupon.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn create_coupon_rejects_short_code() {
        let ctx = TestContext::new().await;

        let result = ctx
            .coupons
            .create_coupon(NewCoupon {
                uuid: CouponUuid::new(),
                code: "AB".to_string(),
                terms: coupon_terms(10),
            })
            .await;

        assert!(
            matches!(
                result,
                Err(CouponsServiceError::Invalid(CouponError::CodeTooShort))
            ),
            "expected CodeTooShort, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_coupon_rejects_percent_over_hundred() {
        let ctx = TestContext::new().await;

        let result = ctx
            .coupons
            .create_coupon(NewCoupon {
                uuid: CouponUuid::new(),
                code: "HUGE".to_string(),
                terms: coupon_terms(120),
            })
            .await;

        assert!(
            matches!(
                result,
                Err(CouponsServiceError::Invalid(CouponError::PercentOutOfRange(120)))
            ),
            "expected PercentOutOfRange, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_coupon_duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.coupons
            .create_coupon(NewCoupon {
                uuid: CouponUuid::new(),
                code: "SAVE10".to_string(),
                terms: coupon_terms(10),
            })
            .await?;

        let result = ctx
            .coupons
            .create_coupon(NewCoupon {
                uuid: CouponUuid::new(),
                code: "save10".to_string(),
                terms: coupon_terms(20),
            })
            .await;

        assert!(
            matches!(result, Err(CouponsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_coupon_unknown_code_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.coupons.find_coupon("NOPE").await;

        assert!(
            matches!(result, Err(CouponsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_coupon_replaces_terms() -> TestResult {
        let ctx = TestContext::new().await;
        let coupon = ctx.create_coupon("SAVE10", coupon_terms(10)).await;

        let updated = ctx
            .coupons
            .update_coupon(
                coupon.uuid,
                CouponTerms {
                    active: false,
                    max_uses: Some(2),
                    ..coupon_terms(15)
                },
            )
            .await?;

        assert_eq!(updated.code, "SAVE10");
        assert_eq!(updated.percent_off, 15);
        assert!(!updated.active);
        assert_eq!(updated.max_uses, Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn delete_coupon_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let coupon = ctx.create_coupon("SAVE10", coupon_terms(10)).await;

        ctx.coupons.delete_coupon(coupon.uuid).await?;

        let result = ctx.coupons.delete_coupon(coupon.uuid).await;

        assert!(
            matches!(result, Err(CouponsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stored_coupon_prices_and_exhausts_like_save10() -> TestResult {
        let ctx = TestContext::new().await;

        let coupon = ctx
            .create_coupon(
                "SAVE10",
                CouponTerms {
                    minimum_spend: 500_00,
                    max_uses: Some(5),
                    ..coupon_terms(10)
                },
            )
            .await;

        sqlx::query("UPDATE coupons SET times_used = 4 WHERE uuid = $1")
            .bind(coupon.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let today = date(2026, 3, 1);
        let stored = ctx.coupons.get_coupon(coupon.uuid).await?.to_coupon();
        let subtotal = Money::from_minor(1000_00, INR);

        let discount = stored.apply(&subtotal, today)?;

        assert_eq!(discount, Money::from_minor(100_00, INR));
        assert_eq!(subtotal.sub(discount)?, Money::from_minor(900_00, INR));

        let redeemed = Coupon {
            times_used: stored.times_used + 1,
            ..stored
        };

        assert_eq!(
            redeemed.check(1000_00, today),
            Err(CouponRejection::LimitReached { max_uses: 5 })
        );

        Ok(())
    }
}
