//! Gifts

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::gifts::records::{GiftClaimRecord, GiftProgress};

use crate::orders::ShippingAddressBody;

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Gift Progress Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GiftProgressResponse {
    /// Delivered products the customer kept.
    pub kept: u64,
    pub threshold: u64,
    pub claimed: bool,
    pub eligible: bool,
}

impl From<GiftProgress> for GiftProgressResponse {
    fn from(progress: GiftProgress) -> Self {
        Self {
            kept: progress.kept,
            threshold: progress.threshold,
            claimed: progress.claimed,
            eligible: progress.eligible,
        }
    }
}

/// Gift Claim Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GiftClaimResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub recipient_name: String,
    pub phone: String,
    pub shipping_address: ShippingAddressBody,
    pub kept_products: u64,
    pub created_at: String,
}

impl From<GiftClaimRecord> for GiftClaimResponse {
    fn from(claim: GiftClaimRecord) -> Self {
        Self {
            uuid: claim.uuid.into_uuid(),
            customer_uuid: claim.customer_uuid.into_uuid(),
            recipient_name: claim.recipient_name,
            phone: claim.phone,
            shipping_address: claim.shipping_address.into(),
            kept_products: claim.kept_products,
            created_at: claim.created_at.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use bazaar_app::domain::{
        customers::records::CustomerUuid, gifts::records::GiftClaimUuid,
        orders::records::ShippingAddress,
    };

    use super::*;

    pub(crate) fn make_claim(customer: CustomerUuid) -> GiftClaimRecord {
        GiftClaimRecord {
            uuid: GiftClaimUuid::new(),
            customer_uuid: customer,
            recipient_name: "Asha Rao".to_string(),
            phone: "+91 98450 00000".to_string(),
            shipping_address: ShippingAddress {
                line1: "12 MG Road".to_string(),
                line2: None,
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                postal_code: "560001".to_string(),
                country: "India".to_string(),
            },
            kept_products: 5,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }
}
