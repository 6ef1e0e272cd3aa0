//! Return Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::returns::ReturnsServiceError;

pub(crate) fn into_status_error(error: ReturnsServiceError) -> StatusError {
    match error {
        ReturnsServiceError::NotFound => {
            StatusError::not_found().brief("Return request not found")
        }
        ReturnsServiceError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        ReturnsServiceError::ItemNotFound => {
            StatusError::not_found().brief("Order item not found")
        }
        error @ ReturnsServiceError::InvalidQuantity { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        ReturnsServiceError::Ineligible(reason) => StatusError::unprocessable_entity()
            .brief(reason.to_string())
            .detail(reason.as_str()),
        ReturnsServiceError::InvalidRefundDetails(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        ReturnsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A return was already requested for this item")
        }
        ReturnsServiceError::InvalidReference | ReturnsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid return request")
        }
        ReturnsServiceError::Sql(source) => {
            error!("return storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
