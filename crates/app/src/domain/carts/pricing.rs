//! Cart pricing over stored minor-unit amounts.

use bazaar::{
    coupons::Coupon,
    pricing::{LineItem, PricingError, price_cart},
};
use jiff::civil::Date;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::domain::carts::records::{CartItemRecord, PricedCart};

/// Every price in the store is in Indian rupees.
pub(crate) const STORE_CURRENCY: &Currency = iso::INR;

fn to_money(amount: u64) -> Result<Money<'static, Currency>, PricingError> {
    let minor = i64::try_from(amount).map_err(|_err| PricingError::Overflow)?;

    Ok(Money::from_minor(minor, STORE_CURRENCY))
}

fn to_amount(money: &Money<'_, Currency>) -> Result<u64, PricingError> {
    u64::try_from(money.to_minor_units()).map_err(|_err| PricingError::Overflow)
}

/// Subtotal of the given lines in minor units.
pub(crate) fn subtotal(items: &[CartItemRecord]) -> Result<i64, PricingError> {
    let lines = line_items(items)?;

    Ok(bazaar::pricing::subtotal(&lines, STORE_CURRENCY)?.to_minor_units())
}

/// Price the lines, re-evaluating `coupon` as of `today`.
pub(crate) fn price_items(
    items: Vec<CartItemRecord>,
    coupon: Option<&Coupon>,
    today: Date,
) -> Result<PricedCart, PricingError> {
    let lines = line_items(&items)?;
    let totals = price_cart(&lines, STORE_CURRENCY, coupon, today)?;

    Ok(PricedCart {
        subtotal: to_amount(&totals.subtotal)?,
        discount: to_amount(&totals.discount)?,
        grand_total: to_amount(&totals.grand_total)?,
        item_count: totals.item_count,
        coupon: totals.coupon,
        items,
    })
}

fn line_items(items: &[CartItemRecord]) -> Result<Vec<LineItem<'static>>, PricingError> {
    items
        .iter()
        .map(|item| Ok(LineItem::new(to_money(item.unit_price)?, item.quantity)))
        .collect()
}
