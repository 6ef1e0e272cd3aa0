//! Browsing History Records

use jiff::Timestamp;

use crate::domain::products::records::ProductUuid;

/// One product the customer looked at, with the latest viewing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRecord {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub viewed_at: Timestamp,
}
