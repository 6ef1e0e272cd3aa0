//! Sign Up Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::auth::NewCustomer;

use crate::{
    auth::{SessionResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Sign Up Request
#[derive(Deserialize, Serialize, ToSchema)]
pub(crate) struct SignUpRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl From<SignUpRequest> for NewCustomer {
    fn from(request: SignUpRequest) -> Self {
        NewCustomer {
            email: request.email,
            name: request.name,
            password: request.password,
        }
    }
}

/// Sign Up Handler
///
/// Creates a customer account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignUpRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .sign_up(json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}
