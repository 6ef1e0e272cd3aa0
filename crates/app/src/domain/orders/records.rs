//! Order Records

use bazaar::{
    orders::{OrderStatus, PaymentMethod},
    products::{Customization, ProductKind},
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{customers::records::CustomerUuid, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Who to contact about an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Delivery address for physical and customized goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub line1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// The coupon an order was placed with, as it stood at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    pub code: String,
    pub percent_off: u8,
}

/// Order Record
///
/// Items and totals are a snapshot taken at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub contact: ContactDetails,
    pub shipping_address: Option<ShippingAddress>,
    pub items: Vec<OrderItemRecord>,
    pub subtotal: u64,
    pub discount: u64,
    pub grand_total: u64,
    pub coupon: Option<AppliedCoupon>,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub placed_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    #[must_use]
    pub fn item(&self, item: OrderItemUuid) -> Option<&OrderItemRecord> {
        self.items.iter().find(|line| line.uuid == item)
    }
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub kind: ProductKind,
    pub unit_price: u64,
    pub quantity: u32,
    pub customization: Option<Customization>,
    pub display_image: String,
    pub download_url: Option<String>,
}
