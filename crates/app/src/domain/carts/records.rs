//! Cart Records

use bazaar::{
    pricing::CouponOutcome,
    products::{Customization, ProductKind},
};
use jiff::Timestamp;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
///
/// Name, kind and unit price are read live from the catalog, so a cart always
/// shows current prices.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_kind: ProductKind,
    pub unit_price: u64,
    pub quantity: u32,
    pub customization: Option<Customization>,
    pub display_image: String,
    pub download_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart with its totals derived for one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedCart {
    pub items: Vec<CartItemRecord>,
    pub subtotal: u64,
    pub discount: u64,
    pub grand_total: u64,
    pub item_count: u64,
    pub coupon: CouponOutcome,
}

impl PricedCart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
