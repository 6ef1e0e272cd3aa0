//! Get Product Handler

use std::sync::Arc;

use bazaar::products::ProductSpecifics;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::records::ProductRecord;

use crate::{
    extensions::*,
    products::{ProductImageBody, errors::into_status_error},
    state::State,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,

    /// Price in paise
    pub price: u64,

    /// `physical`, `customized` or `digital`
    pub kind: String,

    pub category: String,
    pub subcategory: Option<String>,
    pub keywords: Vec<String>,
    pub images: Vec<ProductImageBody>,

    /// Image used in listings, falling back to a placeholder
    pub primary_image: String,

    #[salvo(schema(value_type = Object))]
    pub specifics: ProductSpecifics,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        let primary_image = product.primary_image_url().to_string();

        Self {
            uuid: product.uuid.into_uuid(),
            kind: product.kind().to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            subcategory: product.subcategory,
            keywords: product.keywords,
            images: product.images.into_iter().map(Into::into).collect(),
            primary_image,
            specifics: product.specifics,
        }
    }
}

/// Get Product Handler
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
