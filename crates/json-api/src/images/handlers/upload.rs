//! Upload Image Handler

use std::{error::Error, sync::Arc};

use http_body_util::{BodyExt, LengthLimitError, Limited};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{Span, field::Empty};

use crate::{extensions::*, images::into_status_error, state::State};

/// Largest accepted upload.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Map a failed body read to 413 when the limit was hit and 400 otherwise.
fn payload_error_status(err: &(dyn Error + Send + Sync + 'static)) -> StatusError {
    if err.is::<LengthLimitError>() {
        StatusError::payload_too_large().brief("Image too large")
    } else {
        StatusError::bad_request().brief("Could not read image")
    }
}

/// Read the request body, refusing anything over [`MAX_IMAGE_BYTES`].
async fn read_image(req: &mut Request) -> Result<Vec<u8>, StatusError> {
    let collected = Limited::new(req.take_body(), MAX_IMAGE_BYTES)
        .collect()
        .await
        .map_err(|err| payload_error_status(err.as_ref()))?;

    Ok(collected.to_bytes().to_vec())
}

/// Uploaded Image Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UploadedImageResponse {
    /// Public HTTPS URL, ready to use in a product's image list.
    pub url: String,
}

/// Upload Image Handler
///
/// The request body is the raw image.
#[endpoint(
    tags("admin"),
    summary = "Upload Product Image",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Image uploaded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty or unreadable image"),
        (status_code = StatusCode::PAYLOAD_TOO_LARGE, description = "Image too large"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Image host failed"),
    ),
)]
#[tracing::instrument(
    name = "images.upload",
    skip(file_name, req, depot, res),
    fields(file_name = Empty, bytes = Empty)
)]
pub(crate) async fn handler(
    file_name: QueryParam<String, true>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UploadedImageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let file_name = file_name.into_inner();

    let bytes = read_image(req).await?;

    let span = Span::current();

    span.record("file_name", file_name.as_str());
    span.record("bytes", bytes.len());

    let url = state
        .app
        .images
        .upload(file_name, bytes)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(UploadedImageResponse { url }))
}
