//! Order Errors

use bazaar::coupons::CouponError;
use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief("Your cart is empty")
        }
        OrdersServiceError::MissingShippingAddress => StatusError::bad_request()
            .brief("A shipping address is required for physical items"),
        OrdersServiceError::Coupon(CouponError::Rejected(reason)) => {
            StatusError::unprocessable_entity().brief(reason.to_string())
        }
        OrdersServiceError::Coupon(reason) => StatusError::bad_request().brief(reason.to_string()),
        OrdersServiceError::Payment(reason) => StatusError::conflict().brief(reason.to_string()),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Pricing(source) => {
            error!("failed to price order: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
