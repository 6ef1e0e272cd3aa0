//! Returns
//!
//! Eligibility rules for return requests and validation of the refund details
//! a customer supplies.

use std::{fmt, str::FromStr};

use jiff::{ToSpan, civil::Date};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orders::OrderStatus;

/// Calendar days after the order date during which a return may be requested.
pub const RETURN_WINDOW_DAYS: i32 = 4;

/// Shortest accepted return reason, in characters.
pub const MIN_REASON_LENGTH: usize = 10;

/// Longest accepted return reason, in characters.
pub const MAX_REASON_LENGTH: usize = 500;

/// Status of a return request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnStatus {
    /// Awaiting review.
    #[serde(rename = "Pending")]
    Pending,

    /// Accepted by staff.
    #[serde(rename = "Approved")]
    Approved,

    /// Refused by staff.
    #[serde(rename = "Rejected")]
    Rejected,

    /// Goods are on their way back or being inspected.
    #[serde(rename = "Processing")]
    Processing,

    /// Refund paid.
    #[serde(rename = "Completed")]
    Completed,

    /// Withdrawn.
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl ReturnStatus {
    /// Every status.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Display and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// An existing request in this state prevents a new one for the same line.
    #[must_use]
    pub const fn blocks_new_request(self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Approved | Self::Processing | Self::Completed
        )
    }

    /// Lines with a request in this state no longer count as kept.
    #[must_use]
    pub const fn removes_from_kept(self) -> bool {
        matches!(self, Self::Approved | Self::Processing | Self::Completed)
    }
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`ReturnStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown return status: {0}")]
pub struct UnknownReturnStatus(pub String);

impl FromStr for ReturnStatus {
    type Err = UnknownReturnStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownReturnStatus(value.to_string()))
    }
}

/// Period, in whole calendar days, during which returns are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnWindow {
    days: i32,
}

impl Default for ReturnWindow {
    fn default() -> Self {
        Self {
            days: RETURN_WINDOW_DAYS,
        }
    }
}

impl ReturnWindow {
    /// Length of the window in days.
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Last calendar day a return may be requested for an order placed on `placed_on`.
    pub fn last_day(&self, placed_on: Date) -> Date {
        placed_on.saturating_add(self.days.days())
    }

    /// Whether `today` still falls inside the window.
    ///
    /// Time of day is irrelevant: an order placed late on the 1st is still
    /// returnable on the 5th with a four day window, and not on the 6th.
    pub fn contains(&self, placed_on: Date, today: Date) -> bool {
        today <= self.last_day(placed_on)
    }
}

/// Why a line cannot be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    /// The order was cancelled or already returned.
    #[error("order is {0}")]
    OrderClosed(OrderStatus),

    /// A request for this line already exists.
    #[error("a return request is already {0}")]
    AlreadyRequested(ReturnStatus),

    /// The return window has closed.
    #[error("return window closed on {last_day}")]
    WindowElapsed {
        /// Date the order was placed.
        placed_on: Date,

        /// Last day returns were accepted.
        last_day: Date,
    },
}

impl Ineligibility {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OrderClosed(_) => "order_closed",
            Self::AlreadyRequested(_) => "already_requested",
            Self::WindowElapsed { .. } => "window_elapsed",
        }
    }
}

/// Decide whether a line of an order may be returned.
///
/// Checks run in order: the order's status, then any existing request for the
/// line, then the window. `existing` holds the statuses of every request already
/// recorded for the line.
///
/// # Errors
///
/// Returns the first failing condition as an [`Ineligibility`].
pub fn check_return_eligibility(
    status: OrderStatus,
    existing: impl IntoIterator<Item = ReturnStatus>,
    placed_on: Date,
    today: Date,
    window: ReturnWindow,
) -> Result<(), Ineligibility> {
    if status.is_closed_to_returns() {
        return Err(Ineligibility::OrderClosed(status));
    }

    if let Some(blocking) = existing
        .into_iter()
        .find(|request| request.blocks_new_request())
    {
        return Err(Ineligibility::AlreadyRequested(blocking));
    }

    if !window.contains(placed_on, today) {
        return Err(Ineligibility::WindowElapsed {
            placed_on,
            last_day: window.last_day(placed_on),
        });
    }

    Ok(())
}

/// Problems with the refund details on a return request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefundDetailsError {
    /// The UPI handle is not of the form `name@bank`.
    #[error("invalid UPI ID")]
    InvalidUpiId,

    /// The reason is shorter than [`MIN_REASON_LENGTH`].
    #[error("reason must be at least 10 characters")]
    ReasonTooShort,

    /// The reason is longer than [`MAX_REASON_LENGTH`].
    #[error("reason must be at most 500 characters")]
    ReasonTooLong,
}

/// Check a UPI handle: at least two of `[A-Za-z0-9.-_@]`, then `@`, then at
/// least two ASCII letters.
///
/// # Errors
///
/// Returns [`RefundDetailsError::InvalidUpiId`] when the handle is malformed.
pub fn validate_upi_id(upi_id: &str) -> Result<&str, RefundDetailsError> {
    let upi_id = upi_id.trim();

    let (name, provider) = upi_id
        .rsplit_once('@')
        .ok_or(RefundDetailsError::InvalidUpiId)?;

    let name_ok = name.chars().count() >= 2
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '@'));

    let provider_ok = provider.len() >= 2 && provider.chars().all(|c| c.is_ascii_alphabetic());

    if name_ok && provider_ok {
        Ok(upi_id)
    } else {
        Err(RefundDetailsError::InvalidUpiId)
    }
}

/// Check the length of a return reason after trimming.
///
/// # Errors
///
/// Returns [`RefundDetailsError::ReasonTooShort`] or
/// [`RefundDetailsError::ReasonTooLong`].
pub fn validate_reason(reason: &str) -> Result<&str, RefundDetailsError> {
    let reason = reason.trim();
    let length = reason.chars().count();

    if length < MIN_REASON_LENGTH {
        return Err(RefundDetailsError::ReasonTooShort);
    }

    if length > MAX_REASON_LENGTH {
        return Err(RefundDetailsError::ReasonTooLong);
    }

    Ok(reason)
}
