//! Gift Claim Data

use crate::domain::orders::records::ShippingAddress;

/// Where to send the free gift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftClaim {
    pub recipient_name: String,
    pub phone: String,
    pub shipping_address: ShippingAddress,
}
