//! Order Data

use crate::domain::orders::records::{ContactDetails, ShippingAddress};

/// What the customer supplies at checkout. Everything else comes from the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub contact: ContactDetails,

    /// Required when any line is physical or customized.
    pub shipping_address: Option<ShippingAddress>,
}
