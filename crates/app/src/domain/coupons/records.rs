//! Coupon Records

use bazaar::coupons::Coupon;
use jiff::{Timestamp, civil::Date};

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Coupon Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub code: String,
    pub percent_off: u8,
    pub active: bool,
    pub minimum_spend: u64,
    pub valid_till: Date,
    pub max_uses: Option<u32>,
    pub times_used: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CouponRecord {
    /// The pricing view of this coupon.
    #[must_use]
    pub fn to_coupon(&self) -> Coupon {
        Coupon {
            code: self.code.clone(),
            percent_off: self.percent_off,
            active: self.active,
            minimum_spend: self.minimum_spend,
            valid_till: self.valid_till,
            max_uses: self.max_uses,
            times_used: self.times_used,
        }
    }
}
