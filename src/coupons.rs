//! Coupons

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, INR},
};
use thiserror::Error;

/// Shortest accepted coupon code, after normalisation.
pub const MIN_CODE_LENGTH: usize = 3;

/// Largest accepted percentage discount.
pub const MAX_PERCENT_OFF: u8 = 100;

/// Why a coupon does not apply to a cart right now.
///
/// Variants are listed in the order the checks run, so a coupon that is both
/// inactive and expired reports [`CouponRejection::Inactive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CouponRejection {
    /// The coupon has been switched off.
    #[error("coupon is not active")]
    Inactive,

    /// The last valid day has passed.
    #[error("coupon expired on {valid_till}")]
    Expired {
        /// Last day the coupon could be used.
        valid_till: Date,
    },

    /// The cart subtotal is below the coupon's minimum spend.
    #[error("minimum order amount of {} not met", rupees(*.minimum_spend))]
    MinimumSpendNotMet {
        /// Minimum subtotal in minor units.
        minimum_spend: u64,
    },

    /// Every allowed use has been redeemed.
    #[error("coupon usage limit reached")]
    LimitReached {
        /// Maximum number of redemptions.
        max_uses: u32,
    },
}

impl CouponRejection {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Expired { .. } => "expired",
            Self::MinimumSpendNotMet { .. } => "minimum_spend_not_met",
            Self::LimitReached { .. } => "limit_reached",
        }
    }
}

/// Minor units as rupees, saturating at the largest representable amount.
fn rupees(minor: u64) -> Money<'static, Currency> {
    Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), INR)
}

/// Errors raised while defining or applying a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    /// No code was given.
    #[error("please enter a coupon code")]
    MissingCode,

    /// The code is shorter than [`MIN_CODE_LENGTH`].
    #[error("coupon code must be at least 3 characters")]
    CodeTooShort,

    /// The percentage is above [`MAX_PERCENT_OFF`].
    #[error("discount percentage {0} is out of range")]
    PercentOutOfRange(u8),

    /// The discount could not be represented in minor units.
    #[error("discount amount could not be represented")]
    PercentConversion,

    /// The coupon is well formed but does not apply.
    #[error(transparent)]
    Rejected(#[from] CouponRejection),
}

/// Normalise a code the way it is stored: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Normalise a code and check it is long enough to be stored.
///
/// # Errors
///
/// - [`CouponError::MissingCode`]: the code is blank.
/// - [`CouponError::CodeTooShort`]: the code is shorter than [`MIN_CODE_LENGTH`].
pub fn validate_code(code: &str) -> Result<String, CouponError> {
    let code = normalize_code(code);

    if code.is_empty() {
        return Err(CouponError::MissingCode);
    }

    if code.chars().count() < MIN_CODE_LENGTH {
        return Err(CouponError::CodeTooShort);
    }

    Ok(code)
}

/// A percentage discount code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    /// Upper-cased code.
    pub code: String,

    /// Percentage points taken off the subtotal, `0..=100`.
    pub percent_off: u8,

    /// Whether the coupon can currently be used at all.
    pub active: bool,

    /// Minimum subtotal in minor units.
    pub minimum_spend: u64,

    /// Last day the coupon is valid (inclusive).
    pub valid_till: Date,

    /// Redemption cap, if any.
    pub max_uses: Option<u32>,

    /// Redemptions so far.
    pub times_used: u32,
}

impl Coupon {
    /// Check the code and percentage are acceptable for storage.
    ///
    /// # Errors
    ///
    /// Returns the first definition problem found.
    pub fn validate(&self) -> Result<(), CouponError> {
        validate_code(&self.code)?;

        if self.percent_off > MAX_PERCENT_OFF {
            return Err(CouponError::PercentOutOfRange(self.percent_off));
        }

        Ok(())
    }

    /// The discount as a fractional percentage.
    pub fn percentage(&self) -> Percentage {
        Percentage::from(Decimal::from(self.percent_off) / Decimal::ONE_HUNDRED)
    }

    /// True once `today` is after the last valid day.
    pub fn is_expired_on(&self, today: Date) -> bool {
        today > self.valid_till
    }

    /// Check whether the coupon applies to a cart with the given subtotal.
    ///
    /// # Errors
    ///
    /// Returns the first failing condition as a [`CouponRejection`].
    pub fn check(&self, subtotal_minor: i64, today: Date) -> Result<(), CouponRejection> {
        if !self.active {
            return Err(CouponRejection::Inactive);
        }

        if self.is_expired_on(today) {
            return Err(CouponRejection::Expired {
                valid_till: self.valid_till,
            });
        }

        if i128::from(subtotal_minor) < i128::from(self.minimum_spend) {
            return Err(CouponRejection::MinimumSpendNotMet {
                minimum_spend: self.minimum_spend,
            });
        }

        if let Some(max_uses) = self.max_uses
            && self.times_used >= max_uses
        {
            return Err(CouponRejection::LimitReached { max_uses });
        }

        Ok(())
    }

    /// The discount this coupon gives on `subtotal`, ignoring validity.
    ///
    /// Rounded half away from zero to whole minor units.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::PercentConversion`] if the result overflows.
    pub fn discount_on<'a>(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, CouponError> {
        let minor = Decimal::from(subtotal.to_minor_units());

        let discount = (self.percentage() * Decimal::ONE)
            .checked_mul(minor)
            .ok_or(CouponError::PercentConversion)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(CouponError::PercentConversion)?;

        Ok(Money::from_minor(discount, subtotal.currency()))
    }

    /// Validate the coupon against a cart and compute its discount.
    ///
    /// # Errors
    ///
    /// - [`CouponError::Rejected`]: the coupon does not apply today.
    /// - [`CouponError::PercentConversion`]: the discount overflows.
    pub fn apply<'a>(
        &self,
        subtotal: &Money<'a, Currency>,
        today: Date,
    ) -> Result<Money<'a, Currency>, CouponError> {
        self.check(subtotal.to_minor_units(), today)?;

        self.discount_on(subtotal)
    }
}
