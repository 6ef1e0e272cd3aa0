//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{ApiTokenError, OpenBaoError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, revoked or expired bearer token.
    #[error("token not found")]
    NotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("name is required")]
    MissingName,

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[from] ApiTokenError),

    #[error("OpenBao error")]
    OpenBao(#[from] OpenBaoError),

    #[error("session expiry out of range")]
    Clock(#[from] jiff::Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::EmailTaken,
            Some(ErrorKind::CheckViolation) => Self::InvalidEmail,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
