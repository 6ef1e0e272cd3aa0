//! Return Request Records

use bazaar::returns::{Ineligibility, ReturnStatus};
use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{
        customers::records::CustomerUuid,
        orders::records::{OrderItemUuid, OrderUuid},
    },
    uuids::TypedUuid,
};

/// Return Request UUID
pub type ReturnRequestUuid = TypedUuid<ReturnRequestRecord>;

/// Return Request Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRequestRecord {
    pub uuid: ReturnRequestUuid,
    pub order_uuid: OrderUuid,
    pub order_item_uuid: OrderItemUuid,
    pub customer_uuid: CustomerUuid,
    pub product_name: String,
    pub quantity: u32,
    pub upi_id: String,
    pub reason: String,
    pub status: ReturnStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Whether a line can be returned right now, and until when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnEligibility {
    pub last_day: Date,
    pub ineligibility: Option<Ineligibility>,
}

impl ReturnEligibility {
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.ineligibility.is_none()
    }
}
