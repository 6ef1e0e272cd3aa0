//! Coupons

use jiff::civil::Date;
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::coupons::{data::CouponTerms, records::CouponRecord};

use crate::extensions::*;

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Coupon terms as sent by the back office.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponTermsRequest {
    /// Whole-number percentage, 0 to 100
    pub percent_off: u8,

    #[serde(default = "default_active")]
    pub active: bool,

    /// Smallest subtotal the coupon applies to, in paise
    #[serde(default)]
    pub minimum_spend: u64,

    /// Last valid day, `YYYY-MM-DD`, inclusive
    pub valid_till: String,

    /// Omit for unlimited uses
    #[serde(default)]
    pub max_uses: Option<u32>,
}

const fn default_active() -> bool {
    true
}

impl CouponTermsRequest {
    pub(crate) fn into_terms(self) -> Result<CouponTerms, StatusError> {
        let valid_till = self
            .valid_till
            .parse::<Date>()
            .or_400("valid_till must be a YYYY-MM-DD date")?;

        Ok(CouponTerms {
            percent_off: self.percent_off,
            active: self.active,
            minimum_spend: self.minimum_spend,
            valid_till,
            max_uses: self.max_uses,
        })
    }
}

/// Coupon Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub uuid: Uuid,
    pub code: String,
    pub percent_off: u8,
    pub active: bool,
    pub minimum_spend: u64,
    pub valid_till: String,
    pub max_uses: Option<u32>,
    pub times_used: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        Self {
            uuid: coupon.uuid.into_uuid(),
            code: coupon.code,
            percent_off: coupon.percent_off,
            active: coupon.active,
            minimum_spend: coupon.minimum_spend,
            valid_till: coupon.valid_till.to_string(),
            max_uses: coupon.max_uses,
            times_used: coupon.times_used,
            created_at: coupon.created_at.to_string(),
            updated_at: coupon.updated_at.to_string(),
        }
    }
}
