//! Product Handlers

use bazaar::products::ProductSpecifics;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use bazaar_app::domain::products::data::ProductDetails;

use crate::products::ProductImageBody;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Editable product fields
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Price in paise
    pub price: u64,

    pub category: String,

    #[serde(default)]
    pub subcategory: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub images: Vec<ProductImageBody>,

    /// Kind-specific attributes, tagged by `kind`
    #[salvo(schema(value_type = Object))]
    pub specifics: ProductSpecifics,
}

impl From<ProductDetailsRequest> for ProductDetails {
    fn from(request: ProductDetailsRequest) -> Self {
        ProductDetails {
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
            subcategory: request.subcategory,
            keywords: request.keywords,
            images: request.images.into_iter().map(Into::into).collect(),
            specifics: request.specifics,
        }
    }
}
