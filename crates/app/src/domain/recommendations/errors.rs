//! Recommendations service errors.

use sqlx::Error;
use thiserror::Error;

use crate::integrations::TextGeneratorError;

#[derive(Debug, Error)]
pub enum RecommendationsServiceError {
    #[error("recommendation service unavailable")]
    Generator(#[from] TextGeneratorError),

    #[error("storage error")]
    Sql(#[from] Error),
}
