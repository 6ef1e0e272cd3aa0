//! Gift Records

use jiff::Timestamp;

use crate::{
    domain::{customers::records::CustomerUuid, orders::records::ShippingAddress},
    uuids::TypedUuid,
};

/// Gift Claim UUID
pub type GiftClaimUuid = TypedUuid<GiftClaimRecord>;

/// Gift Claim Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftClaimRecord {
    pub uuid: GiftClaimUuid,
    pub customer_uuid: CustomerUuid,
    pub recipient_name: String,
    pub phone: String,
    pub shipping_address: ShippingAddress,
    /// Kept-product count at the time of the claim.
    pub kept_products: u64,
    pub created_at: Timestamp,
}

/// How close a customer is to the free gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftProgress {
    pub kept: u64,
    pub threshold: u64,
    pub claimed: bool,
    pub eligible: bool,
}
