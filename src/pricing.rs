//! Cart Pricing

use jiff::civil::Date;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::coupons::{Coupon, CouponError, CouponRejection};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line total did not fit in minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The coupon's discount could not be computed.
    #[error(transparent)]
    Coupon(#[from] CouponError),
}

/// One product entry in a cart: a unit price and a quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem<'a> {
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Create a new line item.
    pub fn new(unit_price: Money<'a, Currency>, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }

    /// Price of a single unit.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Number of units.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product does not fit in `i64` minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// Sum of every line total.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total overflowed.
/// - [`PricingError::Money`]: a line is priced in a different currency.
pub fn subtotal<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(item.total()?)?)
        })
}

/// What happened to the coupon attached to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponOutcome {
    /// No coupon is attached.
    NoCoupon,

    /// The coupon applies and its discount is included.
    Applied {
        /// Code of the applied coupon.
        code: String,
    },

    /// The coupon is still attached but currently gives nothing.
    NoLongerApplies {
        /// Code of the attached coupon.
        code: String,

        /// Why it stopped applying.
        reason: CouponRejection,
    },
}

/// Derived cart totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals<'a> {
    /// Sum of unit price × quantity.
    pub subtotal: Money<'a, Currency>,

    /// Coupon discount, zero when no coupon applies.
    pub discount: Money<'a, Currency>,

    /// `max(0, subtotal - discount)`.
    pub grand_total: Money<'a, Currency>,

    /// Total number of units across all lines.
    pub item_count: u64,

    /// Coupon state after re-evaluation.
    pub coupon: CouponOutcome,
}

/// Price a cart, re-evaluating the attached coupon against its current contents.
///
/// A coupon that no longer applies contributes nothing and is reported as
/// [`CouponOutcome::NoLongerApplies`] rather than as an error.
///
/// # Errors
///
/// Returns a [`PricingError`] on arithmetic failure.
pub fn price_cart<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
    coupon: Option<&Coupon>,
    today: Date,
) -> Result<CartTotals<'a>, PricingError> {
    let subtotal = subtotal(items, currency)?;
    let zero = Money::from_minor(0, currency);

    let (discount, outcome) = match coupon {
        None => (zero, CouponOutcome::NoCoupon),
        Some(coupon) => match coupon.apply(&subtotal, today) {
            Ok(discount) => (
                discount,
                CouponOutcome::Applied {
                    code: coupon.code.clone(),
                },
            ),
            Err(CouponError::Rejected(reason)) => (
                zero,
                CouponOutcome::NoLongerApplies {
                    code: coupon.code.clone(),
                    reason,
                },
            ),
            Err(error) => return Err(error.into()),
        },
    };

    let grand_minor = subtotal
        .to_minor_units()
        .saturating_sub(discount.to_minor_units())
        .max(0);

    let item_count = items.iter().map(|item| u64::from(item.quantity())).sum();

    Ok(CartTotals {
        subtotal,
        discount,
        grand_total: Money::from_minor(grand_minor, currency),
        item_count,
        coupon: outcome,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use super::*;

    fn rupees(amount: i64) -> Money<'static, Currency> {
        Money::from_minor(amount * 100, INR)
    }

    fn save10() -> Coupon {
        Coupon {
            code: "SAVE10".to_string(),
            percent_off: 10,
            active: true,
            minimum_spend: 500_00,
            valid_till: date(2026, 12, 31),
            max_uses: Some(5),
            times_used: 4,
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> TestResult {
        let items = [
            LineItem::new(rupees(250), 2),
            LineItem::new(rupees(125), 4),
            LineItem::new(rupees(0), 9),
        ];

        assert_eq!(subtotal(&items, INR)?, rupees(1000));

        Ok(())
    }

    #[test]
    fn empty_cart_prices_to_zero() -> TestResult {
        let totals = price_cart(&[], INR, None, date(2026, 1, 1))?;

        assert_eq!(totals.subtotal, rupees(0));
        assert_eq!(totals.grand_total, rupees(0));
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.coupon, CouponOutcome::NoCoupon);

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let items = [
            LineItem::new(rupees(10), 1),
            LineItem::new(Money::from_minor(10_00, USD), 1),
        ];

        assert!(matches!(
            subtotal(&items, INR),
            Err(PricingError::Money(MoneyError::CurrencyMismatch { .. }))
        ));
    }

    #[test]
    fn overflowing_line_is_an_error() {
        let items = [LineItem::new(Money::from_minor(i64::MAX, INR), 2)];

        assert_eq!(subtotal(&items, INR), Err(PricingError::Overflow));
    }

    #[test]
    fn save10_on_one_thousand_rupees() -> TestResult {
        let items = [LineItem::new(rupees(500), 2)];
        let coupon = save10();

        let totals = price_cart(&items, INR, Some(&coupon), date(2026, 6, 1))?;

        assert_eq!(totals.subtotal, rupees(1000));
        assert_eq!(totals.discount, rupees(100));
        assert_eq!(totals.grand_total, rupees(900));
        assert_eq!(totals.item_count, 2);
        assert_eq!(
            totals.coupon,
            CouponOutcome::Applied {
                code: "SAVE10".to_string()
            }
        );

        Ok(())
    }

    #[test]
    fn removing_items_below_minimum_zeroes_the_discount() -> TestResult {
        let coupon = save10();
        let today = date(2026, 6, 1);

        let full = [LineItem::new(rupees(400), 1), LineItem::new(rupees(300), 1)];
        let before = price_cart(&full, INR, Some(&coupon), today)?;

        assert_eq!(before.discount, rupees(70));

        let reduced = [LineItem::new(rupees(400), 1)];
        let after = price_cart(&reduced, INR, Some(&coupon), today)?;

        assert_eq!(after.discount, rupees(0));
        assert_eq!(after.grand_total, rupees(400));
        assert_eq!(
            after.coupon,
            CouponOutcome::NoLongerApplies {
                code: "SAVE10".to_string(),
                reason: CouponRejection::MinimumSpendNotMet {
                    minimum_spend: 500_00
                },
            }
        );

        Ok(())
    }

    #[test]
    fn minimum_above_subtotal_gives_no_discount_whatever_the_percentage() -> TestResult {
        let coupon = Coupon {
            percent_off: 100,
            minimum_spend: 10_000_00,
            ..save10()
        };

        let items = [LineItem::new(rupees(999), 1)];
        let totals = price_cart(&items, INR, Some(&coupon), date(2026, 6, 1))?;

        assert_eq!(totals.discount, rupees(0));

        Ok(())
    }

    #[test]
    fn exhausted_coupon_is_not_applied() -> TestResult {
        let coupon = Coupon {
            times_used: 5,
            ..save10()
        };

        let items = [LineItem::new(rupees(1000), 1)];
        let totals = price_cart(&items, INR, Some(&coupon), date(2026, 6, 1))?;

        assert_eq!(totals.discount, rupees(0));
        assert!(matches!(
            totals.coupon,
            CouponOutcome::NoLongerApplies {
                reason: CouponRejection::LimitReached { max_uses: 5 },
                ..
            }
        ));

        Ok(())
    }

    #[test]
    fn grand_total_never_goes_negative() -> TestResult {
        let coupon = Coupon {
            percent_off: 100,
            minimum_spend: 0,
            max_uses: None,
            ..save10()
        };

        let items = [LineItem::new(rupees(42), 3)];
        let totals = price_cart(&items, INR, Some(&coupon), date(2026, 6, 1))?;

        assert_eq!(totals.discount, rupees(126));
        assert_eq!(totals.grand_total, rupees(0));

        Ok(())
    }
}
