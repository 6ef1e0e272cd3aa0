//! Browsing History

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::HistoryServiceError;
pub(crate) use repository::PgHistoryRepository;
pub use service::*;
