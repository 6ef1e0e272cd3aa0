//! Recommendations

pub mod errors;
pub mod service;

pub use errors::RecommendationsServiceError;
pub use service::*;
