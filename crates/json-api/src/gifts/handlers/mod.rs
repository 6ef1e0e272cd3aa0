//! Gift Handlers

pub(crate) mod claim;
pub(crate) mod claims;
pub(crate) mod progress;
