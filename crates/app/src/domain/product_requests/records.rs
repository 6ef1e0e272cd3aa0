//! Product Request Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

/// Product Request UUID
pub type ProductRequestUuid = TypedUuid<ProductRequestRecord>;

/// Product Request Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRequestRecord {
    pub uuid: ProductRequestUuid,
    pub customer_uuid: CustomerUuid,
    pub product_name: String,
    pub description: String,
    pub category: Option<String>,
    pub estimated_price: Option<u64>,
    pub reference_url: Option<String>,
    pub status: ProductRequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Where a product request stands with staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductRequestStatus {
    #[default]
    #[serde(rename = "Pending Review")]
    PendingReview,

    #[serde(rename = "Under Consideration")]
    UnderConsideration,

    #[serde(rename = "Approved")]
    Approved,

    #[serde(rename = "Not Feasible")]
    NotFeasible,

    #[serde(rename = "Sourced")]
    Sourced,
}

impl ProductRequestStatus {
    pub const ALL: [Self; 5] = [
        Self::PendingReview,
        Self::UnderConsideration,
        Self::Approved,
        Self::NotFeasible,
        Self::Sourced,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingReview => "Pending Review",
            Self::UnderConsideration => "Under Consideration",
            Self::Approved => "Approved",
            Self::NotFeasible => "Not Feasible",
            Self::Sourced => "Sourced",
        }
    }
}

impl fmt::Display for ProductRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product request status: {0}")]
pub struct UnknownProductRequestStatus(pub String);

impl FromStr for ProductRequestStatus {
    type Err = UnknownProductRequestStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownProductRequestStatus(value.to_string()))
    }
}
