//! Coupons Data

use jiff::civil::Date;

use crate::domain::coupons::records::CouponUuid;

/// New Coupon Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub code: String,
    pub terms: CouponTerms,
}

/// Editable coupon terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponTerms {
    pub percent_off: u8,
    pub active: bool,
    pub minimum_spend: u64,
    pub valid_till: Date,
    pub max_uses: Option<u32>,
}
