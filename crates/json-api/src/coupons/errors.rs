//! Coupon Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon code already exists")
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::Invalid(reason) => StatusError::bad_request().brief(reason.to_string()),
        CouponsServiceError::MissingRequiredData | CouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid coupon payload")
        }
        CouponsServiceError::Sql(source) => {
            error!("coupon storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
