//! Returns

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::returns::records::ReturnRequestRecord;

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;

/// Return Request Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnRequestResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,
    pub order_item_uuid: Uuid,
    pub customer_uuid: Uuid,
    pub product_name: String,
    pub quantity: u32,

    /// UPI handle the refund goes to
    pub upi_id: String,

    pub reason: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReturnRequestRecord> for ReturnRequestResponse {
    fn from(request: ReturnRequestRecord) -> Self {
        Self {
            uuid: request.uuid.into_uuid(),
            order_uuid: request.order_uuid.into_uuid(),
            order_item_uuid: request.order_item_uuid.into_uuid(),
            customer_uuid: request.customer_uuid.into_uuid(),
            product_name: request.product_name,
            quantity: request.quantity,
            upi_id: request.upi_id,
            reason: request.reason,
            status: request.status.to_string(),
            created_at: request.created_at.to_string(),
            updated_at: request.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnRequestsResponse {
    /// Newest first
    pub returns: Vec<ReturnRequestResponse>,
}

impl From<Vec<ReturnRequestRecord>> for ReturnRequestsResponse {
    fn from(returns: Vec<ReturnRequestRecord>) -> Self {
        Self {
            returns: returns.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use bazaar::returns::ReturnStatus;
    use jiff::Timestamp;

    use bazaar_app::domain::{
        customers::records::CustomerUuid,
        orders::records::{OrderItemUuid, OrderUuid},
        returns::records::{ReturnRequestRecord, ReturnRequestUuid},
    };

    pub(crate) fn make_return(uuid: ReturnRequestUuid, customer: CustomerUuid) -> ReturnRequestRecord {
        ReturnRequestRecord {
            uuid,
            order_uuid: OrderUuid::new(),
            order_item_uuid: OrderItemUuid::new(),
            customer_uuid: customer,
            product_name: "Classic Tee".to_string(),
            quantity: 1,
            upi_id: "asha@okbank".to_string(),
            reason: "Too small around the shoulders".to_string(),
            status: ReturnStatus::Pending,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
