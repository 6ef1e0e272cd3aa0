//! Product Requests

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::product_requests::records::ProductRequestRecord;

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Product Request Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequestResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub product_name: String,
    pub description: String,
    pub category: Option<String>,
    pub estimated_price: Option<u64>,
    pub reference_url: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRequestRecord> for ProductRequestResponse {
    fn from(request: ProductRequestRecord) -> Self {
        Self {
            uuid: request.uuid.into_uuid(),
            customer_uuid: request.customer_uuid.into_uuid(),
            product_name: request.product_name,
            description: request.description,
            category: request.category,
            estimated_price: request.estimated_price,
            reference_url: request.reference_url,
            status: request.status.to_string(),
            created_at: request.created_at.to_string(),
            updated_at: request.updated_at.to_string(),
        }
    }
}

/// Product Requests Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequestsResponse {
    pub requests: Vec<ProductRequestResponse>,
}

impl From<Vec<ProductRequestRecord>> for ProductRequestsResponse {
    fn from(requests: Vec<ProductRequestRecord>) -> Self {
        Self {
            requests: requests.into_iter().map(Into::into).collect(),
        }
    }
}
