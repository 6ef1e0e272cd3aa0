//! OpenBao Transit client. Password and session verifiers are HMACs keyed
//! inside OpenBao, so a database dump alone cannot be used to check guesses.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Where the transit engine lives and which key signs verifiers.
#[derive(Debug, Clone)]
pub struct OpenBaoConfig {
    /// e.g. `"http://localhost:8200"`
    pub addr: String,

    pub token: String,

    pub transit_key: String,
}

/// Keyed HMAC signing and verification held outside the database.
#[automock]
#[async_trait]
pub trait Transit: Send + Sync {
    /// Compute the stored verifier for `input`.
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError>;

    /// Check `input` against a stored verifier.
    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError>;
}

#[derive(Debug, Clone)]
pub struct OpenBaoClient {
    config: OpenBaoConfig,
    http: Client,
}

impl OpenBaoClient {
    #[must_use]
    pub fn new(config: OpenBaoConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn transit_url(&self, operation: TransitOperation) -> String {
        format!(
            "{}/v1/transit/{}/{}",
            self.config.addr.trim_end_matches('/'),
            operation.as_str(),
            self.config.transit_key
        )
    }

    async fn call<B, T>(&self, operation: TransitOperation, body: &B) -> Result<T, OpenBaoError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.transit_url(operation))
            .header("X-Vault-Token", &self.config.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(OpenBaoError::UnexpectedResponse(format!(
                "{} returned {status}: {text}",
                operation.as_str()
            )));
        }

        let envelope: TransitResponse<T> = response.json().await?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl Transit for OpenBaoClient {
    /// Verifiers look like `vault:v1:...`.
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
        let data: HmacData = self
            .call(
                TransitOperation::Hmac,
                &TransitRequest {
                    input: BASE64.encode(input),
                    hmac: None,
                },
            )
            .await?;

        Ok(data.hmac)
    }

    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
        let data: VerifyData = self
            .call(
                TransitOperation::Verify,
                &TransitRequest {
                    input: BASE64.encode(input),
                    hmac: Some(hmac),
                },
            )
            .await?;

        Ok(data.valid)
    }
}

#[derive(Debug, Clone, Copy)]
enum TransitOperation {
    Hmac,
    Verify,
}

impl TransitOperation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Hmac => "hmac",
            Self::Verify => "verify",
        }
    }
}

#[derive(Debug, Serialize)]
struct TransitRequest<'a> {
    /// Base64 of the raw verifier input.
    input: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    hmac: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TransitResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct HmacData {
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
}

#[derive(Debug, Error)]
pub enum OpenBaoError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status or a body without the expected `data`.
    #[error("unexpected response from OpenBao: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn client(addr: &str) -> OpenBaoClient {
        OpenBaoClient::new(OpenBaoConfig {
            addr: addr.to_string(),
            token: "root".to_string(),
            transit_key: "bazaar".to_string(),
        })
    }

    #[test]
    fn transit_urls_ignore_a_trailing_slash() {
        assert_eq!(
            client("http://bao:8200/").transit_url(TransitOperation::Hmac),
            "http://bao:8200/v1/transit/hmac/bazaar"
        );
        assert_eq!(
            client("http://bao:8200").transit_url(TransitOperation::Verify),
            "http://bao:8200/v1/transit/verify/bazaar"
        );
    }

    #[test]
    fn hmac_requests_omit_the_verifier() -> TestResult {
        let body = serde_json::to_value(TransitRequest {
            input: BASE64.encode(b"password:asha@example.com:hunter22"),
            hmac: None,
        })?;

        assert!(body.get("hmac").is_none(), "unexpected hmac field: {body}");

        Ok(())
    }
}
