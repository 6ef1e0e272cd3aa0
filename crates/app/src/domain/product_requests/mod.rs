//! Product Requests

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProductRequestsServiceError;
pub use service::*;
