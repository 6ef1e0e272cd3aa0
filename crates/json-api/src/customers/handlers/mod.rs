//! Customer Handlers

pub(crate) mod index;
pub(crate) mod me;
