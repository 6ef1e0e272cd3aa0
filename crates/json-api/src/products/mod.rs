//! Products

use bazaar::products::ProductImage;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Product Image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductImageBody {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,

    /// Colour variant this image shows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default)]
    pub is_primary: bool,
}

impl From<ProductImage> for ProductImageBody {
    fn from(image: ProductImage) -> Self {
        Self {
            url: image.url,
            alt_text: image.alt_text,
            color: image.color,
            is_primary: image.is_primary,
        }
    }
}

impl From<ProductImageBody> for ProductImage {
    fn from(image: ProductImageBody) -> Self {
        Self {
            url: image.url,
            alt_text: image.alt_text,
            color: image.color,
            is_primary: image.is_primary,
        }
    }
}
