//! Error taxonomy shared by every core component.

use thiserror::Error;

/// Errors raised while resolving colors, gradients, images or host mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChromaError {
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),
    #[error("Unsupported gradient type: {0:?}")]
    UnsupportedGradientType(String),
    #[error("Invalid gradient stop format: {0}")]
    InvalidStopFormat(String),
    #[error("A gradient needs at least 2 stops, got {found}")]
    InsufficientStops { found: usize },
    #[error("Unsupported media type: {0:?}")]
    UnsupportedMediaType(String),
    #[error("Image decode failed: {0}")]
    ImageDecodeFailure(String),
    #[error("Host has no insertion context for new shapes")]
    NoInsertionContext,
    #[error("Host rejected fill: {0}")]
    PlatformFillFailure(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for core operations.
pub type ChromaResult<T> = Result<T, ChromaError>;

impl From<image::ImageError> for ChromaError {
    fn from(err: image::ImageError) -> Self {
        ChromaError::ImageDecodeFailure(err.to_string())
    }
}

impl From<serde_json::Error> for ChromaError {
    fn from(err: serde_json::Error) -> Self {
        ChromaError::Config(err.to_string())
    }
}
