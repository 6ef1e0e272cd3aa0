//! Unsigned uploads to a hosted image CDN.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use thiserror::Error;

/// Where and how to upload images.
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    /// Full upload endpoint, e.g. `https://api.cloudinary.com/v1_1/<cloud>/image/upload`.
    pub upload_url: String,

    /// Unsigned upload preset configured on the host.
    pub upload_preset: String,
}

#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("image is empty")]
    Empty,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from image host: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload raw image bytes, returning the public HTTPS URL.
    async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<String, ImageHostError>;
}

#[derive(Debug, Clone)]
pub struct HostedImageClient {
    config: ImageHostConfig,
    http: Client,
}

impl HostedImageClient {
    #[must_use]
    pub fn new(config: ImageHostConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ImageHost for HostedImageClient {
    #[tracing::instrument(
        name = "images.upload",
        skip(self, bytes),
        fields(size = bytes.len()),
        err
    )]
    async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<String, ImageHostError> {
        if bytes.is_empty() {
            return Err(ImageHostError::Empty);
        }

        let form = Form::new()
            .text("upload_preset", self.config.upload_preset.clone())
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response = self
            .http
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ImageHostError::UnexpectedResponse(format!(
                "upload failed with status {status}: {text}"
            )));
        }

        let parsed: UploadResponse = response.json().await?;

        Ok(parsed.secure_url)
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn empty_images_are_rejected_before_uploading() {
        let client = HostedImageClient::new(ImageHostConfig {
            upload_url: "http://127.0.0.1:9/upload".to_string(),
            upload_preset: "bazaar".to_string(),
        });

        let result = client.upload("mug.png".to_string(), Vec::new()).await;

        assert!(
            matches!(result, Err(ImageHostError::Empty)),
            "expected Empty, got {result:?}"
        );
    }

    #[test]
    fn secure_url_is_read_from_the_response() -> TestResult {
        let parsed: UploadResponse = serde_json::from_str(
            r#"{"public_id":"mug","secure_url":"https://cdn.example.com/mug.png"}"#,
        )?;

        assert_eq!(parsed.secure_url, "https://cdn.example.com/mug.png");

        Ok(())
    }
}
