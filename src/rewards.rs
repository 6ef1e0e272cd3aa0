//! Rewards
//!
//! A customer who has kept enough products earns a one-off free gift.

use crate::{orders::OrderStatus, returns::ReturnStatus};

/// Number of kept products needed to unlock the gift.
pub const GIFT_THRESHOLD: u64 = 5;

/// A purchased line as seen by the rewards rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasedLine {
    /// Status of the order the line belongs to.
    pub order_status: OrderStatus,

    /// Units bought.
    pub quantity: u32,

    /// Status of the latest return request for the line, if any.
    pub return_status: Option<ReturnStatus>,
}

impl PurchasedLine {
    /// Whether the customer still holds these goods.
    pub fn is_kept(&self) -> bool {
        self.order_status.counts_as_kept()
            && !self
                .return_status
                .is_some_and(ReturnStatus::removes_from_kept)
    }
}

/// Total units the customer has kept across every order.
pub fn kept_product_count<'a>(lines: impl IntoIterator<Item = &'a PurchasedLine>) -> u64 {
    lines
        .into_iter()
        .filter(|line| line.is_kept())
        .map(|line| u64::from(line.quantity))
        .sum()
}

/// Whether the gift can be claimed now.
pub fn gift_eligible(kept: u64, already_claimed: bool) -> bool {
    !already_claimed && kept >= GIFT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(
        order_status: OrderStatus,
        quantity: u32,
        return_status: Option<ReturnStatus>,
    ) -> PurchasedLine {
        PurchasedLine {
            order_status,
            quantity,
            return_status,
        }
    }

    #[test]
    fn counts_quantities_of_live_orders() {
        let lines = [
            line(OrderStatus::Delivered, 2, None),
            line(OrderStatus::Pending, 1, None),
            line(OrderStatus::Cancelled, 7, None),
            line(OrderStatus::PaymentFailed, 3, None),
            line(OrderStatus::Returned, 4, None),
        ];

        assert_eq!(kept_product_count(&lines), 3);
    }

    #[test]
    fn accepted_returns_are_not_kept() {
        let lines = [
            line(OrderStatus::Delivered, 2, Some(ReturnStatus::Approved)),
            line(OrderStatus::Delivered, 1, Some(ReturnStatus::Completed)),
            line(OrderStatus::ReturnRequested, 1, Some(ReturnStatus::Processing)),
            line(OrderStatus::ReturnRequested, 3, Some(ReturnStatus::Pending)),
            line(OrderStatus::Delivered, 2, Some(ReturnStatus::Rejected)),
        ];

        assert_eq!(kept_product_count(&lines), 5);
    }

    #[test]
    fn gift_needs_five_kept_and_no_prior_claim() {
        assert!(!gift_eligible(4, false));
        assert!(gift_eligible(5, false));
        assert!(!gift_eligible(12, true));
    }
}
