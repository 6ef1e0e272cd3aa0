//! Integrations Config

use clap::Args;

/// External services the storefront calls.
#[derive(Debug, Args)]
pub struct IntegrationsConfig {
    /// Unsigned upload endpoint of the image host
    #[arg(long, env = "IMAGE_UPLOAD_URL")]
    pub image_upload_url: String,

    /// Upload preset sent with every image
    #[arg(long, env = "IMAGE_UPLOAD_PRESET")]
    pub image_upload_preset: String,

    /// Base URL of the text generation API
    #[arg(long, env = "RECOMMENDATION_ENDPOINT")]
    pub recommendation_endpoint: String,

    /// Model asked for recommendations
    #[arg(long, env = "RECOMMENDATION_MODEL", default_value = "gemini-2.0-flash")]
    pub recommendation_model: String,

    /// API key for the text generation API
    #[arg(long, env = "RECOMMENDATION_API_KEY", hide_env_values = true)]
    pub recommendation_api_key: String,
}
