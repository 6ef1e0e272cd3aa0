//! Wishlist

use bazaar::products::Customization;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::wishlists::records::WishlistItemRecord;

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Wishlist Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistItemResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub unit_price: u64,
    pub display_image: String,

    #[salvo(schema(value_type = Option<Object>))]
    pub customization: Option<Customization>,

    pub added_at: String,
}

impl From<WishlistItemRecord> for WishlistItemResponse {
    fn from(item: WishlistItemRecord) -> Self {
        Self {
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            unit_price: item.unit_price,
            display_image: item.display_image,
            customization: item.customization,
            added_at: item.added_at.to_string(),
        }
    }
}
