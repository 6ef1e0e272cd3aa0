//! Auth data models.

use std::fmt;

use jiff::Timestamp;

use crate::{
    auth::ApiTokenVersion,
    domain::customers::records::{CustomerRecord, CustomerUuid},
};

/// Stored token fields needed to check a bearer token.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub customer_uuid: CustomerUuid,
    pub version: ApiTokenVersion,
    /// OpenBao HMAC verifier for the token secret material.
    pub token_hash: String,
}

/// Sign-up details.
#[derive(Clone)]
pub struct NewCustomer {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl fmt::Debug for NewCustomer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCustomer")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// A signed-in customer and the raw bearer token, shown only once.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub customer: CustomerRecord,
    pub expires_at: Timestamp,
}
