//! Cart Data

use bazaar::products::Customization;

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub customization: Option<Customization>,

    /// Image to show for the line; defaults to the product's primary image.
    pub display_image: Option<String>,
}
