//! Product Request Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::product_requests::ProductRequestsServiceError;

pub(crate) fn into_status_error(error: ProductRequestsServiceError) -> StatusError {
    match error {
        ProductRequestsServiceError::NotFound => {
            StatusError::not_found().brief("Product request not found")
        }
        error @ ProductRequestsServiceError::MissingField(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        ProductRequestsServiceError::InvalidReference
        | ProductRequestsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product request")
        }
        ProductRequestsServiceError::Sql(source) => {
            error!("product request storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let status = into_status_error(ProductRequestsServiceError::MissingField("product name"));

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "product name is required");
    }
}
