//! Cart Errors

use bazaar::coupons::CouponError;
use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart item already exists")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::CouponNotFound => {
            StatusError::not_found().brief("Invalid coupon code")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::InvalidCustomization(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        CartsServiceError::Coupon(CouponError::Rejected(reason)) => {
            StatusError::unprocessable_entity().brief(reason.to_string())
        }
        CartsServiceError::Coupon(reason) => StatusError::bad_request().brief(reason.to_string()),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Pricing(source) => {
            error!("failed to price cart: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
