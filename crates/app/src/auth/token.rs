//! Bearer token formatting and parsing, plus the HMAC inputs for tokens and
//! passwords.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::customers::records::CustomerUuid;

/// Bearer token prefix.
pub const API_TOKEN_PREFIX: &str = "bz";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

/// Render a token as `bz_<version>_<uuid>.<hex secret>`.
#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        encode_secret_hex(secret.as_bytes())
    )
}

/// Split a bearer token into its parts.
///
/// # Errors
///
/// Returns an [`ApiTokenError`] describing the first malformed part.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = ApiTokenVersion::from_str(version_segment)?;

    let token_uuid = Uuid::try_parse(token_uuid_segment).or(Err(ApiTokenError::InvalidFormat))?;

    let secret = decode_secret_hex(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret: ApiTokenSecret::from_bytes(secret),
    })
}

/// HMAC input for a bearer token.
///
/// Format: `token:{token_uuid_hex}:{version}:{customer_uuid_hex}:{secret_hex}`
#[must_use]
pub fn build_verifier_input(
    token_uuid: &Uuid,
    version: ApiTokenVersion,
    customer: CustomerUuid,
    secret: &ApiTokenSecret,
) -> Vec<u8> {
    format!(
        "token:{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        customer.into_uuid().simple(),
        encode_secret_hex(secret.as_bytes()),
    )
    .into_bytes()
}

/// HMAC input for a password. Binding the normalized email keeps equal
/// passwords from producing equal verifiers.
#[must_use]
pub fn build_password_input(email: &str, password: &str) -> Vec<u8> {
    format!("password:{email}:{password}").into_bytes()
}

fn encode_secret_hex(secret: &[u8; API_TOKEN_SECRET_BYTES]) -> String {
    use std::fmt::Write as _;

    secret
        .iter()
        .fold(String::with_capacity(API_TOKEN_SECRET_HEX_CHARS), |mut hex, byte| {
            let _infallible = write!(hex, "{byte:02x}");
            hex
        })
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; API_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formatted_token_parses_back() -> TestResult {
        let token_uuid = Uuid::nil();
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);

        assert!(token.starts_with("bz_v1_00000000000000000000000000000000.abab"));

        let parsed = parse_api_token(&token)?;

        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn parse_rejects_foreign_prefix_and_bad_secret() {
        assert!(matches!(
            parse_api_token("lt_v1_00000000000000000000000000000000.aa"),
            Err(ApiTokenError::InvalidFormat)
        ));

        let short_secret = format!("bz_v1_{}.abcd", Uuid::nil().simple());

        assert!(matches!(
            parse_api_token(&short_secret),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));

        let bad_hex = format!("bz_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        assert!(matches!(
            parse_api_token(&bad_hex),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn verifier_inputs_are_bound_to_their_owner() {
        let token_uuid = Uuid::nil();
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);
        let first = CustomerUuid::new();
        let second = CustomerUuid::new();

        assert_eq!(
            build_verifier_input(&token_uuid, ApiTokenVersion::V1, first, &secret),
            build_verifier_input(&token_uuid, ApiTokenVersion::V1, first, &secret),
            "token input must be deterministic"
        );

        assert_ne!(
            build_verifier_input(&token_uuid, ApiTokenVersion::V1, first, &secret),
            build_verifier_input(&token_uuid, ApiTokenVersion::V1, second, &secret),
            "token input must include the customer"
        );

        assert_ne!(
            build_password_input("asha@example.com", "hunter22"),
            build_password_input("ravi@example.com", "hunter22"),
            "password input must include the email"
        );
    }
}
