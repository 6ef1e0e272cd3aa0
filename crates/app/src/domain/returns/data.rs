//! Return Request Data

use crate::domain::orders::records::{OrderItemUuid, OrderUuid};

/// New Return Request Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReturnRequest {
    pub order_uuid: OrderUuid,
    pub order_item_uuid: OrderItemUuid,
    pub quantity: u32,

    /// UPI handle the refund is paid to.
    pub upi_id: String,
    pub reason: String,
}
