//! Products Data

use bazaar::products::{ProductImage, ProductSpecifics};

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Editable product fields, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub subcategory: Option<String>,
    pub keywords: Vec<String>,
    pub images: Vec<ProductImage>,
    pub specifics: ProductSpecifics,
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,

    /// Case-insensitive substring of the name, description or a keyword.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Blank values are treated as absent.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        }

        Self {
            category: non_blank(self.category),
            search: non_blank(self.search),
        }
    }
}
