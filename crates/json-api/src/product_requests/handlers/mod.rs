//! Product Request Handlers

pub(crate) mod admin_index;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod set_status;
