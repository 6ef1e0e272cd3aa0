//! Carts

use bazaar::{pricing::CouponOutcome, products::Customization};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::carts::records::{CartItemRecord, PricedCart};

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_kind: String,

    /// Current catalog price in paise
    pub unit_price: u64,

    pub quantity: u32,

    #[salvo(schema(value_type = Option<Object>))]
    pub customization: Option<Customization>,

    pub display_image: String,

    /// Present for digital products
    pub download_url: Option<String>,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            product_kind: item.product_kind.to_string(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            customization: item.customization,
            display_image: item.display_image,
            download_url: item.download_url,
        }
    }
}

/// The coupon attached to a cart and whether it currently applies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCouponResponse {
    pub code: String,
    pub applied: bool,

    /// Machine-readable reason when `applied` is false
    pub reason: Option<String>,

    /// Human-readable reason when `applied` is false
    pub message: Option<String>,
}

impl CartCouponResponse {
    fn from_outcome(outcome: CouponOutcome) -> Option<Self> {
        match outcome {
            CouponOutcome::NoCoupon => None,
            CouponOutcome::Applied { code } => Some(Self {
                code,
                applied: true,
                reason: None,
                message: None,
            }),
            CouponOutcome::NoLongerApplies { code, reason } => Some(Self {
                code,
                applied: false,
                reason: Some(reason.as_str().to_string()),
                message: Some(reason.to_string()),
            }),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,

    /// Sum of unit price times quantity, in paise
    pub subtotal: u64,

    pub discount: u64,
    pub grand_total: u64,

    /// Total units across all lines
    pub item_count: u64,

    pub coupon: Option<CartCouponResponse>,
}

impl From<PricedCart> for CartResponse {
    fn from(cart: PricedCart) -> Self {
        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            subtotal: cart.subtotal,
            discount: cart.discount,
            grand_total: cart.grand_total,
            item_count: cart.item_count,
            coupon: CartCouponResponse::from_outcome(cart.coupon),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use bazaar::{
        pricing::CouponOutcome,
        products::{Customization, ProductKind},
    };
    use jiff::Timestamp;

    use bazaar_app::domain::{
        carts::records::{CartItemRecord, CartItemUuid, PricedCart},
        products::records::ProductUuid,
    };

    pub(crate) fn make_item(uuid: CartItemUuid, unit_price: u64, quantity: u32) -> CartItemRecord {
        CartItemRecord {
            uuid,
            product_uuid: ProductUuid::new(),
            product_name: "Classic Tee".to_string(),
            product_kind: ProductKind::Physical,
            unit_price,
            quantity,
            customization: Some(Customization {
                selected_size: Some("M".to_string()),
                ..Customization::default()
            }),
            display_image: "https://cdn.example.com/tee.png".to_string(),
            download_url: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(crate) fn priced(items: Vec<CartItemRecord>, discount: u64, coupon: CouponOutcome) -> PricedCart {
        let subtotal = items
            .iter()
            .map(|item| item.unit_price * u64::from(item.quantity))
            .sum();

        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();

        PricedCart {
            items,
            subtotal,
            discount,
            grand_total: subtotal - discount,
            item_count,
            coupon,
        }
    }
}
