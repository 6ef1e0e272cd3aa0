//! Wishlist Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::wishlists::WishlistsServiceError;

pub(crate) fn into_status_error(error: WishlistsServiceError) -> StatusError {
    match error {
        WishlistsServiceError::NotFound => {
            StatusError::not_found().brief("Product is not in the wishlist")
        }
        WishlistsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        WishlistsServiceError::InvalidCustomization(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        WishlistsServiceError::InvalidReference | WishlistsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid wishlist payload")
        }
        WishlistsServiceError::Sql(source) => {
            error!("wishlist storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
