//! Customers

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CustomersServiceError;
pub(crate) use repository::PgCustomersRepository;
pub use service::*;
