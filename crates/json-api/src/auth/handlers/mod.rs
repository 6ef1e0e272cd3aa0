//! Auth Handlers

use bazaar_app::auth::Session;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::customers::CustomerResponse;

pub(crate) mod sign_in;
pub(crate) mod sign_out;
pub(crate) mod sign_up;

/// A freshly issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token; it is only ever shown once
    pub token: String,

    /// When the token stops working
    pub expires_at: String,

    pub customer: CustomerResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at.to_string(),
            customer: session.customer.into(),
        }
    }
}
