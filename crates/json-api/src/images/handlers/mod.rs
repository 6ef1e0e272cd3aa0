//! Image Handlers

pub(crate) mod upload;
