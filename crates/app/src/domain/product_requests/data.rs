//! Product Request Data

/// What a customer would like the store to stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductRequest {
    pub product_name: String,
    pub description: String,
    pub category: Option<String>,
    /// Minor units.
    pub estimated_price: Option<u64>,
    pub reference_url: Option<String>,
}
