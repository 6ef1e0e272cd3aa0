//! Customers

use bazaar_app::domain::customers::records::CustomerRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub uuid: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            uuid: customer.uuid.into_uuid(),
            email: customer.email,
            name: customer.name,
            created_at: customer.created_at.to_string(),
        }
    }
}
