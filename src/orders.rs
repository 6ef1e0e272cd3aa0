//! Orders
//!
//! Order status and payment method vocabularies. Status changes made by
//! staff are unrestricted; only the payment confirmation step is guarded.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::ProductKind;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Cash-on-delivery order awaiting review.
    #[serde(rename = "Pending")]
    Pending,

    /// Online order awaiting payment.
    #[serde(rename = "Pending Payment")]
    PendingPayment,

    /// Online payment received.
    #[serde(rename = "Paid")]
    Paid,

    /// Accepted by staff.
    #[serde(rename = "Approved")]
    Approved,

    /// Being prepared.
    #[serde(rename = "Processing")]
    Processing,

    /// Handed to the carrier.
    #[serde(rename = "Shipped")]
    Shipped,

    /// Received by the customer.
    #[serde(rename = "Delivered")]
    Delivered,

    /// Closed successfully.
    #[serde(rename = "Completed")]
    Completed,

    /// Cancelled before fulfilment.
    #[serde(rename = "Cancelled")]
    Cancelled,

    /// Online payment failed.
    #[serde(rename = "Payment Failed")]
    PaymentFailed,

    /// A line has a return request open.
    #[serde(rename = "Return Requested")]
    ReturnRequested,

    /// Goods came back.
    #[serde(rename = "Returned")]
    Returned,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 12] = [
        Self::Pending,
        Self::PendingPayment,
        Self::Paid,
        Self::Approved,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Completed,
        Self::Cancelled,
        Self::PaymentFailed,
        Self::ReturnRequested,
        Self::Returned,
    ];

    /// Display and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PendingPayment => "Pending Payment",
            Self::Paid => "Paid",
            Self::Approved => "Approved",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::PaymentFailed => "Payment Failed",
            Self::ReturnRequested => "Return Requested",
            Self::Returned => "Returned",
        }
    }

    /// Orders in these states never accept return requests.
    #[must_use]
    pub const fn is_closed_to_returns(self) -> bool {
        matches!(self, Self::Cancelled | Self::Returned)
    }

    /// Whether the goods in this order count as kept for rewards.
    #[must_use]
    pub const fn counts_as_kept(self) -> bool {
        !matches!(self, Self::Cancelled | Self::Returned | Self::PaymentFailed)
    }

    /// Status after a payment attempt on an order awaiting payment.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NotAwaitingPayment`] for any other current status.
    pub const fn after_payment(self, outcome: PaymentOutcome) -> Result<Self, PaymentError> {
        match (self, outcome) {
            (Self::PendingPayment, PaymentOutcome::Succeeded) => Ok(Self::Paid),
            (Self::PendingPayment, PaymentOutcome::Failed) => Ok(Self::PaymentFailed),
            (status, _) => Err(PaymentError::NotAwaitingPayment(status)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid to the courier.
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,

    /// Paid up front.
    #[serde(rename = "Online Payment")]
    OnlinePayment,
}

impl PaymentMethod {
    /// Digital goods cannot be paid on delivery, so any digital line forces online payment.
    pub fn for_kinds(kinds: impl IntoIterator<Item = ProductKind>) -> Self {
        if kinds.into_iter().any(|kind| kind == ProductKind::Digital) {
            Self::OnlinePayment
        } else {
            Self::CashOnDelivery
        }
    }

    /// Status a new order starts in.
    #[must_use]
    pub const fn initial_status(self) -> OrderStatus {
        match self {
            Self::CashOnDelivery => OrderStatus::Pending,
            Self::OnlinePayment => OrderStatus::PendingPayment,
        }
    }

    /// Display and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::OnlinePayment => "Online Payment",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Cash on Delivery" => Ok(Self::CashOnDelivery),
            "Online Payment" => Ok(Self::OnlinePayment),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Result reported by the payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Money captured.
    Succeeded,

    /// Payment declined or abandoned.
    Failed,
}

/// Payment confirmation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The order is not waiting for a payment.
    #[error("order is {0}, not awaiting payment")]
    NotAwaitingPayment(OrderStatus),
}
