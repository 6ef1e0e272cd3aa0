//! Wishlist Records

use bazaar::products::Customization;
use jiff::Timestamp;

use crate::domain::products::records::ProductUuid;

/// Wishlist Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItemRecord {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub display_image: String,
    pub customization: Option<Customization>,
    pub added_at: Timestamp,
}

/// New Wishlist Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewWishlistItem {
    pub product_uuid: ProductUuid,
    pub customization: Option<Customization>,
    pub display_image: Option<String>,
}
