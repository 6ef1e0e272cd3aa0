//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod checkout;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod payment;
pub(crate) mod set_status;
