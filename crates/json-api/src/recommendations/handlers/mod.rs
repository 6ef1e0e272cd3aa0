//! Recommendation Handlers

pub(crate) mod index;
