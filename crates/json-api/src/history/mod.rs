//! Browsing History

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::history::HistoryServiceError;

pub(crate) mod handlers;

pub(crate) use handlers::*;

pub(crate) fn into_status_error(error: HistoryServiceError) -> StatusError {
    match error {
        HistoryServiceError::ProductNotFound | HistoryServiceError::InvalidReference => {
            StatusError::not_found().brief("Product not found")
        }
        HistoryServiceError::Sql(source) => {
            error!("history storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
