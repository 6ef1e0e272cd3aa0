//! Clients for third-party services: image hosting and text generation.

pub mod images;
pub mod text;

pub use images::{HostedImageClient, ImageHost, ImageHostConfig, ImageHostError, MockImageHost};
pub use text::{
    GenerativeTextClient, MockTextGenerator, TextGenerator, TextGeneratorConfig, TextGeneratorError,
};
