//! Product image uploads

use salvo::http::StatusError;
use tracing::warn;

use bazaar_app::integrations::ImageHostError;

pub(crate) mod handlers;

pub(crate) use handlers::*;

pub(crate) fn into_status_error(error: ImageHostError) -> StatusError {
    match error {
        ImageHostError::Empty => StatusError::bad_request().brief("Image is empty"),
        error @ (ImageHostError::Http(_) | ImageHostError::UnexpectedResponse(_)) => {
            warn!("image upload failed: {error}");

            StatusError::bad_gateway().brief("Image host unavailable")
        }
    }
}
