//! State

use std::{fmt, sync::Arc};

use bazaar_app::context::AppContext;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Back-office Basic credentials.
///
/// Only SHA-256 digests are kept, so every comparison runs over 32 bytes
/// whatever the length of the submitted values.
#[derive(Clone)]
pub(crate) struct AdminCredentials {
    username: String,
    username_digest: [u8; 32],
    password_digest: [u8; 32],
}

impl AdminCredentials {
    pub(crate) fn new(username: impl Into<String>, password: impl AsRef<[u8]>) -> Self {
        let username = username.into();

        Self {
            username_digest: digest(username.as_bytes()),
            password_digest: digest(password.as_ref()),
            username,
        }
    }

    /// Both values are always compared, in constant time.
    pub(crate) fn matches(&self, username: &str, password: &str) -> bool {
        let username = digest(username.as_bytes());
        let password = digest(password.as_bytes());

        let username_ok = self.username_digest.as_slice().ct_eq(username.as_slice());
        let password_ok = self.password_digest.as_slice().ct_eq(password.as_slice());

        (username_ok & password_ok).into()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

fn digest(value: &[u8]) -> [u8; 32] {
    Sha256::digest(value).into()
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin: AdminCredentials,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin: AdminCredentials) -> Self {
        Self { app, admin }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, admin: AdminCredentials) -> Arc<Self> {
        Arc::new(Self::new(app, admin))
    }
}
