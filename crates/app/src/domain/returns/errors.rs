//! Returns service errors.

use bazaar::returns::{Ineligibility, RefundDetailsError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReturnsServiceError {
    #[error("return request not found")]
    NotFound,

    #[error("order not found")]
    OrderNotFound,

    #[error("order item not found")]
    ItemNotFound,

    #[error("quantity must be between 1 and {ordered}")]
    InvalidQuantity { ordered: u32 },

    #[error(transparent)]
    Ineligible(#[from] Ineligibility),

    #[error(transparent)]
    InvalidRefundDetails(#[from] RefundDetailsError),

    #[error("return request already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReturnsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
