//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// A product with the same uuid was created before.
    #[error("product already exists")]
    AlreadyExists,

    /// Missing or soft-deleted.
    #[error("product not found")]
    NotFound,

    #[error("referenced record does not exist")]
    InvalidReference,

    #[error("product name, price and category are required")]
    MissingRequiredData,

    /// Blank name, negative price or an empty category.
    #[error("product details are invalid")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::RowNotFound => return Self::NotFound,
            other => other.as_database_error().map(DatabaseError::kind),
        };

        match kind {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
