//! Customer Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::customers::CustomersServiceError;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
        CustomersServiceError::Sql(source) => {
            error!("failed to load customer: {source}");

            StatusError::internal_server_error()
        }
    }
}
