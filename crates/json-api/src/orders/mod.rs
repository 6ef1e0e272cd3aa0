//! Orders

use bazaar::products::Customization;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::orders::records::{
    AppliedCoupon, ContactDetails, OrderItemRecord, OrderRecord, ShippingAddress,
};

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Contact Details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactBody {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<ContactBody> for ContactDetails {
    fn from(contact: ContactBody) -> Self {
        ContactDetails {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

impl From<ContactDetails> for ContactBody {
    fn from(contact: ContactDetails) -> Self {
        Self {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

/// Shipping Address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressBody {
    pub line1: String,

    #[serde(default)]
    pub line2: Option<String>,

    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(address: ShippingAddressBody) -> Self {
        ShippingAddress {
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        Self {
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub name: String,
    pub kind: String,

    /// Price paid per unit, in paise
    pub unit_price: u64,

    pub quantity: u32,

    #[salvo(schema(value_type = Option<Object>))]
    pub customization: Option<Customization>,

    pub display_image: String,
    pub download_url: Option<String>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            name: item.name,
            kind: item.kind.to_string(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            customization: item.customization,
            display_image: item.display_image,
            download_url: item.download_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedCouponResponse {
    pub code: String,
    pub percent_off: u8,
}

impl From<AppliedCoupon> for AppliedCouponResponse {
    fn from(coupon: AppliedCoupon) -> Self {
        Self {
            code: coupon.code,
            percent_off: coupon.percent_off,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub contact: ContactBody,
    pub shipping_address: Option<ShippingAddressBody>,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: u64,
    pub discount: u64,
    pub grand_total: u64,
    pub coupon: Option<AppliedCouponResponse>,

    /// `Cash on Delivery` or `Online Payment`
    pub payment_method: String,

    pub status: String,
    pub placed_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            customer_uuid: order.customer_uuid.into_uuid(),
            contact: order.contact.into(),
            shipping_address: order.shipping_address.map(Into::into),
            items: order.items.into_iter().map(Into::into).collect(),
            subtotal: order.subtotal,
            discount: order.discount,
            grand_total: order.grand_total,
            coupon: order.coupon.map(Into::into),
            payment_method: order.payment_method.to_string(),
            status: order.status.to_string(),
            placed_at: order.placed_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Newest first
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        Self {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}
