//! Product Records

use bazaar::products::{ProductImage, ProductKind, ProductSpecifics, primary_image_url};
use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub subcategory: Option<String>,
    pub keywords: Vec<String>,
    pub images: Vec<ProductImage>,
    pub specifics: ProductSpecifics,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        self.specifics.kind()
    }

    /// Image shown in listings and used for new cart lines.
    #[must_use]
    pub fn primary_image_url(&self) -> &str {
        primary_image_url(&self.images)
    }
}
