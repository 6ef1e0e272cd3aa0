//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid or expired token"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::EmailTaken => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        error @ (AuthServiceError::InvalidEmail
        | AuthServiceError::MissingName
        | AuthServiceError::WeakPassword { .. }) => {
            StatusError::bad_request().brief(error.to_string())
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process api token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::OpenBao(source) => {
            error!("OpenBao error during authentication: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Clock(source) => {
            error!("session expiry out of range: {source}");

            StatusError::internal_server_error()
        }
    }
}
