//! Sign In Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{SessionResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Sign In Request
#[derive(Deserialize, Serialize, ToSchema)]
pub(crate) struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Sign In Handler
///
/// Exchanges an email and password for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignInRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let SignInRequest { email, password } = json.into_inner();

    let session = state
        .app
        .auth
        .sign_in(email, password, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
